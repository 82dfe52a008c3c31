use crate::utils::error::Result;
use async_trait::async_trait;

/// Read-only access to a blob container. A client is scoped to a single
/// container at construction; blob names are resolved within it.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Download the full contents of a named blob. No streaming or partial
    /// reads; the invocation blocks until every byte is retrieved.
    async fn download(&self, name: &str) -> Result<Vec<u8>>;
}
