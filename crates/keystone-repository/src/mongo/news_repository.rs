//! MongoDB news repository.

use crate::{mongo::DatabaseConnectionInterface, traits::NewsRepository};
use async_trait::async_trait;
use keystone_config::CollectionConfig;
use keystone_core::{Instrumentation, KeystoneError, KeystoneResult, NewsData, Response};
use mongodb::Collection;
use tracing::debug;

/// News repository bound to the news collection.
///
/// Reads are not implemented yet; the collection binding exists so callers
/// can be wired against it.
pub struct MongoNewsRepository<N: NewsData> {
    news: Collection<N>,
}

impl<N: NewsData> MongoNewsRepository<N> {
    /// Binds the repository to the configured news collection.
    #[must_use]
    pub fn new(connection: &dyn DatabaseConnectionInterface, collections: &CollectionConfig) -> Self {
        Self {
            news: connection.database().collection(&collections.news),
        }
    }

    /// Returns the bound collection name.
    #[must_use]
    pub fn collection_name(&self) -> &str {
        self.news.name()
    }
}

#[async_trait]
impl<N: NewsData> NewsRepository<N> for MongoNewsRepository<N> {
    async fn latest(&self, instrumentation: &Instrumentation, timestamp: i64) -> KeystoneResult<Response<Vec<N>>> {
        debug!(
            correlation_id = %instrumentation,
            namespace = %self.news.namespace(),
            timestamp,
            "Repository: latest news"
        );
        Err(KeystoneError::NotImplemented("latest"))
    }
}

impl<N: NewsData> std::fmt::Debug for MongoNewsRepository<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoNewsRepository")
            .field("news", &self.news.namespace())
            .finish()
    }
}
