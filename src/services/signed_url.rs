use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::{
    domain::{
        errors::UploadError,
        models::{ObjectMetadata, SigningRequest, TimeUnit, DEFAULT_URL_EXPIRY},
    },
    ports::storage::BlobStorage,
};

/// Signs path-style read URLs for stored objects
#[derive(Clone)]
pub struct SignedUrlGenerator {
    storage: Arc<dyn BlobStorage>,
    duration: u64,
    unit: TimeUnit,
}

impl SignedUrlGenerator {
    pub fn new(storage: Arc<dyn BlobStorage>) -> Self {
        let (duration, unit) = DEFAULT_URL_EXPIRY;
        Self {
            storage,
            duration,
            unit,
        }
    }

    pub fn with_expiry(mut self, duration: u64, unit: TimeUnit) -> Self {
        self.duration = duration;
        self.unit = unit;
        self
    }

    /// Sign with the configured validity window
    pub async fn sign_default(&self, metadata: &ObjectMetadata) -> Result<Url, UploadError> {
        self.sign(metadata, self.duration, self.unit).await
    }

    /// Sign a path-style URL for an object that already exists
    pub async fn sign(
        &self,
        metadata: &ObjectMetadata,
        duration: u64,
        unit: TimeUnit,
    ) -> Result<Url, UploadError> {
        let request = SigningRequest::path_style(metadata.clone(), duration, unit);
        let url = self.storage.sign_url(&request).await?;

        debug!(object = %metadata.identifier, duration, ?unit, "Signed object URL");

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        errors::StorageResult,
        models::{ObjectIdentifier, UrlStyle},
        value_objects::{BucketName, ObjectKey},
    };
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::{sync::Mutex, time::Duration};

    #[derive(Default)]
    struct RecordingSigner {
        requests: Mutex<Vec<(UrlStyle, Duration)>>,
    }

    #[async_trait]
    impl BlobStorage for RecordingSigner {
        async fn create_object(&self, _: &ObjectMetadata, _: Bytes) -> StorageResult<()> {
            Ok(())
        }

        async fn sign_url(&self, request: &SigningRequest) -> StorageResult<Url> {
            let expires_in = request.expires_in()?;
            self.requests
                .lock()
                .unwrap()
                .push((request.style, expires_in));
            Ok(Url::parse("https://storage.example.com/mybucket/report.txt").unwrap())
        }
    }

    fn metadata() -> ObjectMetadata {
        ObjectMetadata::new(ObjectIdentifier::new(
            BucketName::new("mybucket").unwrap(),
            ObjectKey::new("report.txt"),
        ))
    }

    #[tokio::test]
    async fn test_default_expiry_is_ten_minutes_path_style() {
        let signer = Arc::new(RecordingSigner::default());
        let generator = SignedUrlGenerator::new(signer.clone());

        generator.sign_default(&metadata()).await.unwrap();

        let requests = signer.requests.lock().unwrap();
        assert_eq!(
            requests.as_slice(),
            &[(UrlStyle::PathStyle, Duration::from_secs(600))]
        );
    }

    #[tokio::test]
    async fn test_configured_expiry_is_used() {
        let signer = Arc::new(RecordingSigner::default());
        let generator = SignedUrlGenerator::new(signer.clone()).with_expiry(2, TimeUnit::Hours);

        generator.sign_default(&metadata()).await.unwrap();

        let requests = signer.requests.lock().unwrap();
        assert_eq!(requests[0].1, Duration::from_secs(7200));
    }

    #[tokio::test]
    async fn test_out_of_range_expiry_is_an_error() {
        let generator = SignedUrlGenerator::new(Arc::new(RecordingSigner::default()));

        let result = generator
            .sign(&metadata(), 8, TimeUnit::Days)
            .await;

        assert!(matches!(
            result,
            Err(UploadError::Storage(crate::domain::errors::StorageError::InvalidExpiry { .. }))
        ));
    }
}
