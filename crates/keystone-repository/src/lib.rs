//! # Keystone Repository
//!
//! Three-layer data access hierarchy:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository<U>>   (domain interface)
//! UserRepositoryImpl<U>             (fetch / transactional update rules)
//!   ↓  Arc<dyn UserDao<U>>          (DAO interface)
//! MongoUserDao<U>                   (DAO impl, MongoDB)
//!   ↓
//! MongoDB
//! ```
//!
//! ## Structure
//!
//! ```text
//! src/
//!   traits.rs                    ← UserRepository / NewsRepository traits
//!   projection.rs                ← field-exclusion profiles
//!   impl/
//!     user_repository_impl.rs    ← UserRepositoryImpl
//!   dao/
//!     user_dao.rs                ← UserDao / UserTransaction traits
//!     impl/mongo.rs              ← MongoUserDao
//!   mongo/
//!     connection.rs              ← MongoConnection
//!     news_repository.rs         ← MongoNewsRepository
//!   di.rs                        ← shaku module and builders
//! ```

pub mod dao;
pub mod di;
pub mod mongo;
pub mod projection;
pub mod traits;
pub mod r#impl;

#[cfg(test)]
pub(crate) mod test_support;

pub use dao::{MongoUserDao, UserDao, UserFilter, UserTransaction};
pub use di::*;
pub use mongo::*;
pub use projection::Projection;
pub use r#impl::UserRepositoryImpl;
pub use traits::*;
