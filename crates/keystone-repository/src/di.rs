//! Dependency injection using Shaku.
//!
//! The shaku module owns the single [`MongoConnection`]; the generic
//! repositories are then bound to it for the concrete document types.

use crate::{
    dao::{MongoUserDao, UserDao},
    mongo::{DatabaseConnectionInterface, MongoConnection, MongoConnectionParameters, MongoNewsRepository},
    traits::{NewsRepository, UserRepository},
    UserRepositoryImpl,
};
use keystone_config::{AppConfig, CollectionConfig, DatabaseConfig};
use keystone_core::{module, HasComponent, KeystoneResult, News, User};
use std::sync::Arc;
use tracing::info;

// Repository layer module.
// Holds the MongoDB connection shared by every repository.
module! {
    pub RepositoryModule {
        components = [
            MongoConnection,
        ],
        providers = [],
    }
}

/// Builds the repository module from database configuration.
pub async fn build_repository_module(db_config: &DatabaseConfig) -> KeystoneResult<Arc<RepositoryModule>> {
    let connection = MongoConnection::connect(db_config).await?;

    let module = RepositoryModule::builder()
        .with_component_parameters::<MongoConnection>(MongoConnectionParameters {
            client: connection.client().clone(),
            database: connection.database().clone(),
        })
        .build();

    Ok(Arc::new(module))
}

/// Trait for resolving the database connection from a module.
pub trait DatabaseResolver {
    /// Resolves the shared connection.
    fn database_connection(&self) -> Arc<dyn DatabaseConnectionInterface>;
}

impl DatabaseResolver for RepositoryModule {
    fn database_connection(&self) -> Arc<dyn DatabaseConnectionInterface> {
        self.resolve()
    }
}

/// The wired repositories for the built-in document types.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository<User>>,
    pub news: Arc<dyn NewsRepository<News>>,
    pub connection: Arc<dyn DatabaseConnectionInterface>,
}

impl Repositories {
    /// Binds the repositories to the module's connection.
    #[must_use]
    pub fn from_module(module: &RepositoryModule, collections: &CollectionConfig) -> Self {
        let connection = module.database_connection();
        let user_dao: Arc<dyn UserDao<User>> = Arc::new(MongoUserDao::<User>::new(connection.as_ref(), collections));

        Self {
            users: Arc::new(UserRepositoryImpl::<User>::new(user_dao)),
            news: Arc::new(MongoNewsRepository::<News>::new(connection.as_ref(), collections)),
            connection,
        }
    }

    /// Builds the module and wires the repositories from application configuration.
    pub async fn connect(config: &AppConfig) -> KeystoneResult<Self> {
        let module = build_repository_module(&config.database).await?;
        info!(
            database = %config.database.name,
            users = %config.collections.users,
            plans = %config.collections.plans,
            news = %config.collections.news,
            "Repositories wired"
        );
        Ok(Self::from_module(&module, &config.collections))
    }
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories")
            .field("database", &self.connection.database().name())
            .finish_non_exhaustive()
    }
}
