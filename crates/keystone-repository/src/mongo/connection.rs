//! MongoDB client and database handle management.

use async_trait::async_trait;
use keystone_config::DatabaseConfig;
use keystone_core::{Interface, KeystoneError, KeystoneResult};
use mongodb::{bson::doc, options::ClientOptions, Client, Database};
use shaku::Component;
use tracing::{info, warn};

/// Interface for the shared MongoDB connection.
///
/// Repositories resolve this from the DI module instead of owning a client.
#[async_trait]
pub trait DatabaseConnectionInterface: Interface + Send + Sync {
    /// Returns the pooled client; cloning it is cheap.
    fn client(&self) -> &Client;

    /// Returns the handle of the configured database.
    fn database(&self) -> &Database;

    /// Pings the deployment.
    async fn health_check(&self) -> KeystoneResult<()>;

    /// Shuts the client down, waiting for pooled connections to close.
    async fn close(&self);
}

/// Connection wrapper holding one client and its configured database.
#[derive(Component)]
#[shaku(interface = DatabaseConnectionInterface)]
pub struct MongoConnection {
    client: Client,
    database: Database,
}

impl MongoConnection {
    /// Builds a client from configuration.
    ///
    /// The driver connects lazily, so an unreachable server surfaces on the
    /// first operation rather than here. Use [`health_check`] to fail fast.
    ///
    /// [`health_check`]: DatabaseConnectionInterface::health_check
    pub async fn connect(config: &DatabaseConfig) -> KeystoneResult<Self> {
        info!(database = %config.name, "Configuring MongoDB client...");

        let mut options = ClientOptions::parse(&config.uri).await.map_err(|e| {
            warn!("Invalid MongoDB connection string: {}", e);
            KeystoneError::Configuration(format!("Invalid MongoDB URI: {}", e))
        })?;
        options.app_name = config.app_name.clone();
        options.min_pool_size = Some(config.min_pool_size);
        options.max_pool_size = Some(config.max_pool_size);
        options.connect_timeout = Some(config.connect_timeout());
        options.server_selection_timeout = Some(config.server_selection_timeout());

        let client = Client::with_options(options)?;
        info!("MongoDB client ready");
        Ok(Self::with_client(client, &config.name))
    }

    /// Wraps an existing client (for shaku parameters and tests).
    #[must_use]
    pub fn with_client(client: Client, database_name: &str) -> Self {
        let database = client.database(database_name);
        Self { client, database }
    }

    /// Returns the database name.
    #[must_use]
    pub fn database_name(&self) -> &str {
        self.database.name()
    }
}

#[async_trait]
impl DatabaseConnectionInterface for MongoConnection {
    fn client(&self) -> &Client {
        &self.client
    }

    fn database(&self) -> &Database {
        &self.database
    }

    async fn health_check(&self) -> KeystoneResult<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| KeystoneError::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    async fn close(&self) {
        info!("Closing MongoDB client...");
        self.client.clone().shutdown().await;
        info!("MongoDB client closed");
    }
}

impl std::fmt::Debug for MongoConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoConnection")
            .field("database", &self.database.name())
            .finish_non_exhaustive()
    }
}
