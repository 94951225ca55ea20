use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use crate::domain::{
    errors::StorageResult,
    models::{ObjectMetadata, SigningRequest},
};

/// Port for the object-storage backend.
///
/// Implementations are shared read-only between all in-flight requests.
#[async_trait]
pub trait BlobStorage: Send + Sync + 'static {
    /// Create (or overwrite) the object described by `metadata` with `data`
    async fn create_object(&self, metadata: &ObjectMetadata, data: Bytes) -> StorageResult<()>;

    /// Produce a signed URL granting time-limited read access to an existing object
    async fn sign_url(&self, request: &SigningRequest) -> StorageResult<Url>;
}
