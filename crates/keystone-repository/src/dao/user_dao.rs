//! UserDao trait: low-level user data access abstraction.
//!
//! Implementations connect directly to a single data source. The
//! [`UserRepository`] implementation uses a `UserDao` to fulfil the
//! domain-level operations and owns every business rule; a DAO only
//! reports what the store did.
//!
//! [`UserRepository`]: crate::traits::UserRepository

use crate::Projection;
use async_trait::async_trait;
use keystone_core::{KeystoneResult, UserData};
use mongodb::bson::{doc, Document};

/// Single-match lookup against the user collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserFilter<'a> {
    /// Equality on the primary identifier.
    ById(&'a str),
    /// Equality on the nested external identity id.
    ByExternalId(&'a str),
}

impl<'a> UserFilter<'a> {
    /// Returns the stored field path the filter matches on.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::ById(_) => "id",
            Self::ByExternalId(_) => "external.id",
        }
    }

    /// Returns the value the field must equal.
    #[must_use]
    pub const fn value(&self) -> &'a str {
        match self {
            Self::ById(value) | Self::ByExternalId(value) => *value,
        }
    }

    /// Checks an in-memory user against the filter.
    #[must_use]
    pub fn matches<U: UserData>(&self, user: &U) -> bool {
        match self {
            Self::ById(id) => user.id() == *id,
            Self::ByExternalId(id) => user.external_id() == *id,
        }
    }

    /// Renders the filter as a MongoDB query document.
    #[must_use]
    pub fn to_document(&self) -> Document {
        doc! { self.field(): self.value() }
    }
}

/// Low-level user data access object.
#[async_trait]
pub trait UserDao<U: UserData>: Send + Sync {
    /// Finds the single user matching `filter`.
    ///
    /// More than one match is an error, not a silent first pick.
    async fn find_user(&self, filter: UserFilter<'_>, projection: &Projection) -> KeystoneResult<Option<U>>;

    /// Finds the first plan with the given id.
    async fn find_plan(&self, plan_id: &str, projection: &Projection) -> KeystoneResult<Option<U::Plan>>;

    /// Opens a session and starts a transaction on it.
    async fn begin(&self) -> KeystoneResult<Box<dyn UserTransaction<U>>>;
}

/// Operations on the user collection scoped to one open transaction.
///
/// Dropping a transaction without calling [`commit`](Self::commit) or
/// [`abort`](Self::abort) discards its writes.
#[async_trait]
pub trait UserTransaction<U: UserData>: Send {
    /// Finds a user by primary id inside the transaction.
    async fn find_by_id(&mut self, user_id: &str, projection: &Projection) -> KeystoneResult<Option<U>>;

    /// Inserts a new user document.
    async fn insert(&mut self, user: &U) -> KeystoneResult<()>;

    /// Replaces the document matching `user_id` (upserting), returning the modified count.
    async fn replace(&mut self, user_id: &str, user: &U) -> KeystoneResult<u64>;

    /// Commits every write made through this transaction.
    async fn commit(self: Box<Self>) -> KeystoneResult<()>;

    /// Aborts the transaction, discarding its writes.
    async fn abort(self: Box<Self>) -> KeystoneResult<()>;
}
