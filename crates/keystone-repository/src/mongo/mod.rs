//! MongoDB implementations.

mod connection;
mod news_repository;

pub use connection::*;
pub use news_repository::MongoNewsRepository;
