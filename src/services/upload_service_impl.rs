use async_trait::async_trait;
use chrono::Utc;
use std::{sync::Arc, time::Duration};
use tracing::{info, instrument};

use crate::{
    domain::{
        errors::UploadError,
        models::{ObjectMetadata, StorageHealth, TimeUnit, UploadReceipt, DEFAULT_URL_EXPIRY},
        value_objects::BucketName,
    },
    ports::{
        services::{ByteStream, UploadService},
        storage::BlobStorage,
    },
    services::{
        identifier::build_identifier, ingest::UploadIngestor, signed_url::SignedUrlGenerator,
        storage_client::StorageClient,
    },
};

/// Implementation of UploadService: identifier, then ingestion, then signing
#[derive(Clone)]
pub struct UploadServiceImpl {
    bucket: BucketName,
    subdirectory: Option<String>,
    storage: Arc<StorageClient>,
    url_expiry: (u64, TimeUnit),
    reject_partial_uploads: bool,
}

impl UploadServiceImpl {
    /// Create a new UploadServiceImpl with the default 10 minute expiry
    pub fn new(bucket: BucketName, subdirectory: Option<String>, storage: StorageClient) -> Self {
        Self {
            bucket,
            subdirectory,
            storage: Arc::new(storage),
            url_expiry: DEFAULT_URL_EXPIRY,
            reject_partial_uploads: false,
        }
    }

    pub fn bucket(&self) -> &BucketName {
        &self.bucket
    }

    pub fn subdirectory(&self) -> Option<&str> {
        self.subdirectory.as_deref()
    }

    fn expiry_duration(&self) -> Duration {
        let (duration, unit) = self.url_expiry;
        unit.to_duration(duration)
    }
}

#[async_trait]
impl UploadService for UploadServiceImpl {
    #[instrument(skip(self, content), fields(bucket = %self.bucket))]
    async fn upload(
        &self,
        filename: &str,
        content: ByteStream<'_>,
    ) -> Result<UploadReceipt, UploadError> {
        let storage = self.storage.get()?;

        let identifier = build_identifier(&self.bucket, self.subdirectory.as_deref(), filename);
        let metadata = ObjectMetadata::new(identifier);

        let outcome = UploadIngestor::new(storage.clone())
            .reject_partial_uploads(self.reject_partial_uploads)
            .ingest(&metadata, content)
            .await?;

        let (duration, unit) = self.url_expiry;
        let signed_at = Utc::now();
        let url = SignedUrlGenerator::new(storage.clone())
            .with_expiry(duration, unit)
            .sign_default(&metadata)
            .await?;

        let expires_at = signed_at
            + chrono::Duration::from_std(self.expiry_duration())
                .unwrap_or_else(|_| chrono::Duration::zero());

        info!(
            object = %metadata.identifier,
            size = outcome.size,
            skipped_chunks = outcome.chunks_skipped,
            %expires_at,
            "Upload stored and signed"
        );

        Ok(UploadReceipt {
            url,
            identifier: metadata.identifier,
            size: outcome.size,
            chunks_skipped: outcome.chunks_skipped,
            expires_at,
        })
    }

    fn storage_health(&self) -> StorageHealth {
        self.storage.health()
    }
}

/// Builder for UploadServiceImpl
pub struct UploadServiceBuilder {
    bucket: Option<BucketName>,
    subdirectory: Option<String>,
    storage: Option<StorageClient>,
    url_expiry: (u64, TimeUnit),
    reject_partial_uploads: bool,
}

impl UploadServiceBuilder {
    pub fn new() -> Self {
        Self {
            bucket: None,
            subdirectory: None,
            storage: None,
            url_expiry: DEFAULT_URL_EXPIRY,
            reject_partial_uploads: false,
        }
    }

    pub fn bucket(mut self, bucket: BucketName) -> Self {
        self.bucket = Some(bucket);
        self
    }

    pub fn subdirectory(mut self, subdirectory: Option<String>) -> Self {
        self.subdirectory = subdirectory;
        self
    }

    pub fn storage(mut self, storage: Arc<dyn BlobStorage>) -> Self {
        self.storage = Some(StorageClient::ready(storage));
        self
    }

    pub fn storage_client(mut self, storage: StorageClient) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn url_expiry(mut self, duration: u64, unit: TimeUnit) -> Self {
        self.url_expiry = (duration, unit);
        self
    }

    pub fn reject_partial_uploads(mut self, reject: bool) -> Self {
        self.reject_partial_uploads = reject;
        self
    }

    pub fn build(self) -> Result<UploadServiceImpl, &'static str> {
        let bucket = self.bucket.ok_or("Bucket is required")?;
        let storage = self.storage.ok_or("Storage client is required")?;

        let mut service = UploadServiceImpl::new(bucket, self.subdirectory, storage);
        service.url_expiry = self.url_expiry;
        service.reject_partial_uploads = self.reject_partial_uploads;
        Ok(service)
    }
}

impl Default for UploadServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        errors::{ChunkError, StorageError, StorageResult},
        models::SigningRequest,
    };
    use bytes::Bytes;
    use futures::{stream, StreamExt};
    use std::sync::Mutex;
    use url::Url;

    /// Records calls and signs with a fake host
    #[derive(Default)]
    struct FakeStorage {
        calls: Mutex<Vec<String>>,
        fail_create: bool,
    }

    #[async_trait]
    impl BlobStorage for FakeStorage {
        async fn create_object(&self, metadata: &ObjectMetadata, _data: Bytes) -> StorageResult<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("create {}", metadata.identifier));
            if self.fail_create {
                return Err(StorageError::AccessDenied {
                    key: metadata.key().clone(),
                    operation: "create".to_string(),
                });
            }
            Ok(())
        }

        async fn sign_url(&self, request: &SigningRequest) -> StorageResult<Url> {
            let expires = request.expires_in()?.as_secs();
            self.calls
                .lock()
                .unwrap()
                .push(format!("sign {} {}", request.metadata.identifier, expires));
            Ok(Url::parse(&format!(
                "https://storage.test/{}?expires={}",
                request.metadata.identifier, expires
            ))
            .unwrap())
        }
    }

    fn body(parts: &'static [&'static str]) -> ByteStream<'static> {
        stream::iter(
            parts
                .iter()
                .map(|p| Ok::<_, ChunkError>(Bytes::from_static(p.as_bytes()))),
        )
        .boxed()
    }

    #[tokio::test]
    async fn test_upload_runs_steps_in_order() {
        let storage = Arc::new(FakeStorage::default());
        let service = UploadServiceBuilder::new()
            .bucket(BucketName::new("mybucket").unwrap())
            .subdirectory(Some("2024".to_string()))
            .storage(storage.clone())
            .build()
            .unwrap();

        let receipt = service.upload("report.txt", body(&["a", "b"])).await.unwrap();

        assert_eq!(receipt.identifier.key.as_str(), "2024/report.txt");
        assert_eq!(receipt.size, 2);
        assert_eq!(
            receipt.url.as_str(),
            "https://storage.test/mybucket/2024/report.txt?expires=600"
        );
        assert_eq!(
            *storage.calls.lock().unwrap(),
            vec![
                "create mybucket/2024/report.txt".to_string(),
                "sign mybucket/2024/report.txt 600".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_create_skips_signing() {
        let storage = Arc::new(FakeStorage {
            fail_create: true,
            ..Default::default()
        });
        let service = UploadServiceImpl::new(
            BucketName::new("mybucket").unwrap(),
            None,
            StorageClient::ready(storage.clone()),
        );

        let result = service.upload("report.txt", body(&["data"])).await;

        assert!(matches!(
            result,
            Err(UploadError::Storage(StorageError::AccessDenied { .. }))
        ));
        assert_eq!(storage.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_custom_expiry_is_used() {
        let storage = Arc::new(FakeStorage::default());
        let service = UploadServiceBuilder::new()
            .bucket(BucketName::new("mybucket").unwrap())
            .storage(storage)
            .url_expiry(90, TimeUnit::Seconds)
            .build()
            .unwrap();

        let before = Utc::now();
        let receipt = service.upload("a.txt", body(&[])).await.unwrap();

        assert!(receipt.url.as_str().ends_with("expires=90"));
        assert!(receipt.expires_at >= before + chrono::Duration::seconds(90));
        assert!(receipt.expires_at <= Utc::now() + chrono::Duration::seconds(90));
    }

    #[tokio::test]
    async fn test_unavailable_storage_fails_without_reading_body() {
        let service = UploadServiceImpl::new(
            BucketName::new("mybucket").unwrap(),
            None,
            StorageClient::unavailable("credentials missing"),
        );

        let result = service.upload("report.txt", body(&["data"])).await;

        assert!(matches!(result, Err(UploadError::Configuration { .. })));
        assert!(!service.storage_health().is_available());
    }

    #[test]
    fn test_builder_requires_bucket_and_storage() {
        assert!(UploadServiceBuilder::new().build().is_err());
        assert!(UploadServiceBuilder::new()
            .bucket(BucketName::new("mybucket").unwrap())
            .build()
            .is_err());
    }
}
