use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

use crate::domain::{
    errors::{ChunkError, UploadError},
    models::{StorageHealth, UploadReceipt},
};

/// Single-pass stream of body chunks for one file part
pub type ByteStream<'a> = BoxStream<'a, Result<Bytes, ChunkError>>;

/// Port for the upload-to-signed-URL pipeline
#[async_trait]
pub trait UploadService: Send + Sync + 'static {
    /// Store the file part under its computed key and return a signed URL for it
    async fn upload(
        &self,
        filename: &str,
        content: ByteStream<'_>,
    ) -> Result<UploadReceipt, UploadError>;

    /// Report whether a storage client was initialized
    fn storage_health(&self) -> StorageHealth;
}
