//! DAO (Data Access Object) layer.
//!
//! DAOs are the only code that talks to the document store. The
//! repository layer above them owns the business rules.
//!
//! Hierarchy:
//! ```text
//! Service → Repository (interface + impl) → DAO (interface + impl) → MongoDB
//! ```

pub mod r#impl;
pub mod user_dao;

pub use r#impl::MongoUserDao;
pub use user_dao::{UserDao, UserFilter, UserTransaction};
