//! `UserRepositoryImpl`, the repository layer implementation.
//!
//! Implements the [`UserRepository`] domain interface on top of a
//! [`UserDao`]:
//!
//! ```text
//! Service
//!   ↓ Arc<dyn UserRepository<U>>
//! UserRepositoryImpl<U>        ← plan resolution, insert-or-replace rules
//!   ↓ Arc<dyn UserDao<U>>
//! MongoUserDao<U> / …
//!   ↓
//! MongoDB
//! ```
//!
//! The update path takes no in-process lock. Isolation between concurrent
//! updates comes from the store's session-scoped transaction only.
//!
//! [`UserRepository`]: crate::traits::UserRepository
//! [`UserDao`]: crate::dao::UserDao

use crate::{
    dao::{UserDao, UserFilter, UserTransaction},
    traits::UserRepository,
    Projection,
};
use async_trait::async_trait;
use keystone_core::{
    ensure_not_empty, timestamp, Instrumentation, KeystoneError, KeystoneResult, Response, UserData,
    ValidateExt, INVALID_USER_UPDATE, MISSING_PLAN_ID,
};
use std::sync::Arc;
use tracing::{debug, debug_span, error, warn, Instrument};

/// Result of the write-and-confirm steps inside one transaction.
enum WriteOutcome {
    /// Written and read back; safe to commit.
    Confirmed,
    /// Refused by a business rule; the transaction must be aborted.
    Rejected(Option<&'static str>),
}

/// Repository implementation that orchestrates [`UserDao`] access.
///
/// [`UserDao`]: crate::dao::UserDao
pub struct UserRepositoryImpl<U: UserData> {
    user_dao: Arc<dyn UserDao<U>>,
    /// Projection applied to every user read.
    projection: Projection,
}

impl<U: UserData> UserRepositoryImpl<U> {
    /// Creates a new `UserRepositoryImpl` reading with [`Projection::DEFAULT`].
    #[must_use]
    pub fn new(user_dao: Arc<dyn UserDao<U>>) -> Self {
        Self {
            user_dao,
            projection: Projection::DEFAULT,
        }
    }

    /// Reads users through another projection profile.
    ///
    /// A profile that excludes `planId` makes every plan-resolving fetch
    /// fail with "Missing PlanId".
    #[must_use]
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Returns the projection applied to user reads.
    #[must_use]
    pub const fn projection(&self) -> Projection {
        self.projection
    }

    async fn fetch_matching(
        &self,
        instrumentation: &Instrumentation,
        filter: UserFilter<'_>,
        exclude_plan: bool,
    ) -> KeystoneResult<Response<U>> {
        let Some(mut user) = self.user_dao.find_user(filter, &self.projection).await? else {
            debug!(field = filter.field(), value = filter.value(), "User not found");
            return Ok(Response::failure(instrumentation));
        };

        if exclude_plan {
            return Ok(Response::success(instrumentation, user));
        }

        let Some(plan_id) = user.plan_id() else {
            if self.projection.excludes("planId") {
                debug!(user_id = user.id(), "Read projection hides the plan reference");
            } else {
                warn!(user_id = user.id(), "User has no plan reference");
            }
            return Ok(Response::failure_with(instrumentation, MISSING_PLAN_ID));
        };

        let plan = self.user_dao.find_plan(plan_id, &Projection::DEFAULT).await?;
        if plan.is_none() {
            debug!(plan_id, "Plan reference does not resolve");
        }
        user.set_plan(plan);

        Ok(Response::success(instrumentation, user))
    }

    /// Runs the whole update inside one transaction and settles it.
    async fn upsert_in_transaction(
        &self,
        instrumentation: &Instrumentation,
        user_id: &str,
        user: U,
    ) -> KeystoneResult<Response<U>> {
        // The resolved plan lives in its own collection.
        let mut stored = user.clone();
        stored.set_plan(None);

        let mut transaction = self.user_dao.begin().await?;

        match self.write_confirmed(transaction.as_mut(), user_id, &stored).await {
            Ok(WriteOutcome::Confirmed) => {
                transaction.commit().await?;
                debug!(user_id, "User update committed");
                Ok(Response::success(instrumentation, user))
            }
            Ok(WriteOutcome::Rejected(message)) => {
                transaction.abort().await?;
                debug!(user_id, "User update aborted");
                Ok(match message {
                    Some(message) => Response::failure_with(instrumentation, message),
                    None => Response::failure(instrumentation),
                })
            }
            Err(e) => {
                if let Err(abort_error) = transaction.abort().await {
                    warn!(user_id, error = %abort_error, "Failed to abort user update transaction");
                }
                Err(e)
            }
        }
    }

    /// Inserts or replaces, then reads the record back.
    ///
    /// Only an insert failure is downgraded to a rejection; a failing
    /// replace or read surfaces as `Err`.
    async fn write_confirmed(
        &self,
        transaction: &mut dyn UserTransaction<U>,
        user_id: &str,
        user: &U,
    ) -> KeystoneResult<WriteOutcome> {
        let existing = transaction.find_by_id(user_id, &self.projection).await?;

        if existing.is_none() {
            if let Err(e) = transaction.insert(user).await {
                error!(user_id, error = %e, "Insert of new user failed");
                return Ok(WriteOutcome::Rejected(Some(INVALID_USER_UPDATE)));
            }
        } else {
            let modified = transaction.replace(user_id, user).await?;
            if modified == 0 {
                warn!(user_id, "Replace modified no documents");
                return Ok(WriteOutcome::Rejected(Some(INVALID_USER_UPDATE)));
            }
        }

        if transaction.find_by_id(user_id, &self.projection).await?.is_none() {
            warn!(user_id, "User missing after write");
            return Ok(WriteOutcome::Rejected(None));
        }

        Ok(WriteOutcome::Confirmed)
    }
}

#[async_trait]
impl<U: UserData> UserRepository<U> for UserRepositoryImpl<U> {
    async fn fetch(
        &self,
        instrumentation: &Instrumentation,
        user_id: &str,
        exclude_plan: bool,
    ) -> KeystoneResult<Response<U>> {
        ensure_not_empty("user_id", user_id)?;

        debug!("Repository: fetch {}", user_id);
        self.fetch_matching(instrumentation, UserFilter::ById(user_id), exclude_plan)
            .instrument(debug_span!("fetch_user", correlation_id = %instrumentation))
            .await
    }

    async fn fetch_by_external_id(
        &self,
        instrumentation: &Instrumentation,
        external_user_id: &str,
        exclude_plan: bool,
    ) -> KeystoneResult<Response<U>> {
        ensure_not_empty("external_user_id", external_user_id)?;

        debug!("Repository: fetch_by_external_id {}", external_user_id);
        self.fetch_matching(
            instrumentation,
            UserFilter::ByExternalId(external_user_id),
            exclude_plan,
        )
        .instrument(debug_span!("fetch_user_by_external_id", correlation_id = %instrumentation))
        .await
    }

    async fn update_from_external(
        &self,
        instrumentation: &Instrumentation,
        user_id: &str,
        mut user: U,
    ) -> KeystoneResult<Response<U>> {
        ensure_not_empty("user_id", user_id)?;
        user.validate_entity()?;

        debug!("Repository: update_from_external {}", user_id);
        user.set_updated_timestamp(timestamp());

        let result = self
            .upsert_in_transaction(instrumentation, user_id, user)
            .instrument(debug_span!("update_user_from_external", correlation_id = %instrumentation))
            .await;

        if let Err(e) = &result {
            error!(user_id, correlation_id = %instrumentation, error = %e, "User update from external source failed");
        }
        result
    }

    async fn refresh_settings(
        &self,
        instrumentation: &Instrumentation,
        _parameters: serde_json::Value,
    ) -> KeystoneResult<()> {
        debug!(correlation_id = %instrumentation, "Repository: refresh_settings");
        Err(KeystoneError::NotImplemented("refresh_settings"))
    }

    async fn update_settings(
        &self,
        instrumentation: &Instrumentation,
        _requested_settings: serde_json::Value,
    ) -> KeystoneResult<()> {
        debug!(correlation_id = %instrumentation, "Repository: update_settings");
        Err(KeystoneError::NotImplemented("update_settings"))
    }
}

impl<U: UserData> std::fmt::Debug for UserRepositoryImpl<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRepositoryImpl")
            .field("projection", &self.projection)
            .finish_non_exhaustive()
    }
}
