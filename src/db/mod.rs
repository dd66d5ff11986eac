pub mod blog;
pub mod connection;
pub mod favorites;
pub mod migrations;
pub mod properties;
