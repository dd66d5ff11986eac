pub mod blog;
pub mod favorite;
pub mod property;
