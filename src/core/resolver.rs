use crate::adapters::azure::AzureBlobStorage;
use crate::config::StorageConfig;
use crate::core::dataset::DATASET_CONTAINER;
use crate::domain::ports::BlobStorage;
use crate::utils::error::Result;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Lazily resolves the process-wide storage client.
///
/// Construction is deferred to the first request so that a process with
/// incomplete configuration still starts; the first successful resolution is
/// cached for the process lifetime. A failed attempt is not cached
/// (`OnceCell::get_or_try_init` leaves the cell empty on error), so a later
/// request retries after the operator fixes the environment.
pub struct BlobClientResolver {
    config: StorageConfig,
    client: OnceCell<Arc<dyn BlobStorage>>,
}

impl BlobClientResolver {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    /// Pre-seed the cache with an already-built client. Used by tests to
    /// inject storage doubles; resolution never runs.
    pub fn with_client(client: Arc<dyn BlobStorage>) -> Self {
        Self {
            config: StorageConfig::default(),
            client: OnceCell::new_with(Some(client)),
        }
    }

    pub async fn resolve(&self) -> Result<Arc<dyn BlobStorage>> {
        self.client
            .get_or_try_init(|| async {
                tracing::info!("Initializing blob storage client");
                let storage = AzureBlobStorage::connect(&self.config, DATASET_CONTAINER)?;
                Ok(Arc::new(storage) as Arc<dyn BlobStorage>)
            })
            .await
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::FetchError;
    use async_trait::async_trait;

    struct NullStorage;

    #[async_trait]
    impl BlobStorage for NullStorage {
        async fn download(&self, _name: &str) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_resolve_returns_injected_client() {
        let resolver = BlobClientResolver::with_client(Arc::new(NullStorage));
        let first = resolver.resolve().await.unwrap();
        let second = resolver.resolve().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_failed_resolution_is_retried() {
        let resolver = BlobClientResolver::new(StorageConfig::default());

        // Unconfigured storage fails every time instead of latching a
        // permanent error state.
        for _ in 0..2 {
            let err = resolver.resolve().await.err().unwrap();
            assert!(matches!(err, FetchError::ConfigError { .. }));
        }
    }
}
