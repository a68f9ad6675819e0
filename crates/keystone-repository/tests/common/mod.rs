//! Common test infrastructure for MongoDB integration tests.

use keystone_config::{CollectionConfig, DatabaseConfig};
use keystone_core::Plan;
use keystone_repository::{DatabaseConnectionInterface, MongoConnection};
use std::sync::Arc;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::mongo::Mongo;

/// Test database container wrapper.
///
/// Runs a single-node replica set, since transactions are refused by a
/// standalone server.
pub struct TestDatabase {
    _container: ContainerAsync<Mongo>,
    connection: Arc<MongoConnection>,
    collections: CollectionConfig,
}

impl TestDatabase {
    /// Starts a fresh container and creates the collections up front.
    pub async fn new() -> Self {
        let container = Mongo::repl_set()
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");

        let config = DatabaseConfig {
            uri: format!("mongodb://127.0.0.1:{}/?directConnection=true", port),
            name: format!("keystone_test_{}", uuid::Uuid::new_v4().simple()),
            max_pool_size: 5,
            ..DatabaseConfig::default()
        };

        let connection = Self::connect_with_retry(&config, 30).await;

        let collections = CollectionConfig::default();
        for name in [&collections.users, &collections.plans, &collections.news] {
            connection
                .database()
                .create_collection(name)
                .await
                .expect("Failed to create collection");
        }

        Self {
            _container: container,
            connection: Arc::new(connection),
            collections,
        }
    }

    /// Returns the shared connection.
    pub fn connection(&self) -> Arc<MongoConnection> {
        Arc::clone(&self.connection)
    }

    pub fn collections(&self) -> &CollectionConfig {
        &self.collections
    }

    /// Inserts a plan document directly.
    pub async fn seed_plan(&self, plan: &Plan) {
        self.connection
            .database()
            .collection::<Plan>(&self.collections.plans)
            .insert_one(plan)
            .await
            .expect("Failed to seed plan");
    }

    /// Connects and waits until the replica set accepts commands.
    async fn connect_with_retry(config: &DatabaseConfig, max_attempts: u32) -> MongoConnection {
        let connection = MongoConnection::connect(config)
            .await
            .expect("Failed to configure MongoDB client");

        let mut attempts = 0;
        loop {
            attempts += 1;
            match connection.health_check().await {
                Ok(()) => return connection,
                Err(e) => {
                    if attempts >= max_attempts {
                        panic!("MongoDB not ready after {} attempts: {}", max_attempts, e);
                    }
                    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                }
            }
        }
    }
}
