//! DAO implementations.
//!
//! Trait definitions live in the parent `dao/` module (`user_dao.rs`).
//! Implementations are organized by store.

pub mod mongo;

pub use mongo::MongoUserDao;
