//! Repository trait definitions.

use async_trait::async_trait;
use keystone_core::{Instrumentation, KeystoneResult, NewsData, Response, UserData};

/// User repository trait.
///
/// Soft failures (not found, missing plan reference, rejected update) are
/// returned inside the [`Response`]; `Err` is reserved for invalid arguments,
/// store failures and unimplemented operations.
#[async_trait]
pub trait UserRepository<U: UserData>: Send + Sync {
    /// Fetches a user by primary id, embedding its plan unless `exclude_plan`.
    async fn fetch(
        &self,
        instrumentation: &Instrumentation,
        user_id: &str,
        exclude_plan: bool,
    ) -> KeystoneResult<Response<U>>;

    /// Fetches a user by external identity id, embedding its plan unless `exclude_plan`.
    async fn fetch_by_external_id(
        &self,
        instrumentation: &Instrumentation,
        external_user_id: &str,
        exclude_plan: bool,
    ) -> KeystoneResult<Response<U>>;

    /// Inserts or replaces a user received from the external identity source.
    async fn update_from_external(
        &self,
        instrumentation: &Instrumentation,
        user_id: &str,
        user: U,
    ) -> KeystoneResult<Response<U>>;

    /// Refreshes user settings. Not implemented.
    async fn refresh_settings(
        &self,
        instrumentation: &Instrumentation,
        parameters: serde_json::Value,
    ) -> KeystoneResult<()>;

    /// Updates user settings. Not implemented.
    async fn update_settings(
        &self,
        instrumentation: &Instrumentation,
        requested_settings: serde_json::Value,
    ) -> KeystoneResult<()>;
}

/// News repository trait.
#[async_trait]
pub trait NewsRepository<N: NewsData>: Send + Sync {
    /// Returns news published since `timestamp`. Not implemented.
    async fn latest(&self, instrumentation: &Instrumentation, timestamp: i64) -> KeystoneResult<Response<Vec<N>>>;
}
