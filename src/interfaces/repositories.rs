pub mod album;
pub mod image;
pub mod sqlx_repo;
pub mod token;
pub mod user;
