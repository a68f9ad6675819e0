//! MongoDB implementation of the `UserDao` trait.

use crate::{
    dao::{UserDao, UserFilter, UserTransaction},
    mongo::DatabaseConnectionInterface,
    Projection,
};
use async_trait::async_trait;
use futures::TryStreamExt;
use keystone_config::CollectionConfig;
use keystone_core::{KeystoneError, KeystoneResult, UserData};
use mongodb::{bson::doc, Client, ClientSession, Collection};
use tracing::debug;

/// MongoDB user DAO over the user and plan collections.
pub struct MongoUserDao<U: UserData> {
    client: Client,
    users: Collection<U>,
    plans: Collection<U::Plan>,
}

impl<U: UserData> MongoUserDao<U> {
    /// Binds the DAO to the configured collections of the connection's database.
    #[must_use]
    pub fn new(connection: &dyn DatabaseConnectionInterface, collections: &CollectionConfig) -> Self {
        let database = connection.database();
        Self {
            client: connection.client().clone(),
            users: database.collection(&collections.users),
            plans: database.collection(&collections.plans),
        }
    }
}

#[async_trait]
impl<U: UserData> UserDao<U> for MongoUserDao<U> {
    async fn find_user(&self, filter: UserFilter<'_>, projection: &Projection) -> KeystoneResult<Option<U>> {
        debug!(collection = %self.users.name(), field = filter.field(), "DAO: find_user");

        let mut matches: Vec<U> = self
            .users
            .find(filter.to_document())
            .projection(projection.to_document())
            .limit(2)
            .await?
            .try_collect()
            .await?;

        if matches.len() > 1 {
            return Err(KeystoneError::Database(format!(
                "More than one user matches {} = {}",
                filter.field(),
                filter.value()
            )));
        }
        Ok(matches.pop())
    }

    async fn find_plan(&self, plan_id: &str, projection: &Projection) -> KeystoneResult<Option<U::Plan>> {
        debug!(collection = %self.plans.name(), plan_id, "DAO: find_plan");

        let plan = self
            .plans
            .find_one(doc! { "id": plan_id })
            .projection(projection.to_document())
            .await?;
        Ok(plan)
    }

    async fn begin(&self) -> KeystoneResult<Box<dyn UserTransaction<U>>> {
        let mut session = self.client.start_session().await?;
        session.start_transaction().await?;
        debug!("DAO: transaction started");

        Ok(Box::new(MongoUserTransaction {
            users: self.users.clone(),
            session,
        }))
    }
}

impl<U: UserData> std::fmt::Debug for MongoUserDao<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoUserDao")
            .field("users", &self.users.namespace())
            .field("plans", &self.plans.namespace())
            .finish()
    }
}

/// User collection operations bound to one session with an open transaction.
///
/// A dropped session with a transaction in progress is aborted by the driver.
struct MongoUserTransaction<U: UserData> {
    users: Collection<U>,
    session: ClientSession,
}

#[async_trait]
impl<U: UserData> UserTransaction<U> for MongoUserTransaction<U> {
    async fn find_by_id(&mut self, user_id: &str, projection: &Projection) -> KeystoneResult<Option<U>> {
        let user = self
            .users
            .find_one(UserFilter::ById(user_id).to_document())
            .projection(projection.to_document())
            .session(&mut self.session)
            .await?;
        Ok(user)
    }

    async fn insert(&mut self, user: &U) -> KeystoneResult<()> {
        self.users.insert_one(user).session(&mut self.session).await?;
        Ok(())
    }

    async fn replace(&mut self, user_id: &str, user: &U) -> KeystoneResult<u64> {
        let result = self
            .users
            .replace_one(UserFilter::ById(user_id).to_document(), user)
            .upsert(true)
            .session(&mut self.session)
            .await?;
        debug!(
            matched = result.matched_count,
            modified = result.modified_count,
            "DAO: replace"
        );
        Ok(result.modified_count)
    }

    async fn commit(mut self: Box<Self>) -> KeystoneResult<()> {
        self.session.commit_transaction().await?;
        Ok(())
    }

    async fn abort(mut self: Box<Self>) -> KeystoneResult<()> {
        self.session.abort_transaction().await?;
        Ok(())
    }
}
