pub mod blog;
pub mod favorites;
pub mod listings;
