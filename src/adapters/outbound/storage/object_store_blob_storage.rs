use async_trait::async_trait;
use bytes::Bytes;
use object_store::{
    aws::{AmazonS3, AmazonS3Builder},
    gcp::GoogleCloudStorageBuilder,
    path::Path as ObjectPath,
    signer::Signer,
    Attribute, Attributes, ObjectStore, PutOptions, PutPayload,
};
use std::sync::Arc;
use url::Url;

use crate::{
    adapters::outbound::credentials::ServiceAccountKey,
    domain::{
        errors::{StorageError, StorageResult},
        models::{ObjectMetadata, SigningRequest, UrlStyle},
        value_objects::{BucketName, ObjectKey},
    },
    ports::storage::BlobStorage,
};

/// Connection settings for an S3-compatible backend
#[derive(Debug, Clone, Default)]
pub struct S3Settings {
    pub endpoint: Option<String>,
    pub region: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
}

/// BlobStorage backed by Apache object_store.
///
/// Writes go through `store` and URLs are signed by `signer`; for real
/// backends both are the same client, bound to a single bucket.
#[derive(Debug, Clone)]
pub struct ObjectStoreBlobStorage {
    store: Arc<dyn ObjectStore>,
    signer: Arc<dyn Signer>,
    bucket: BucketName,
}

impl ObjectStoreBlobStorage {
    pub fn new(store: Arc<dyn ObjectStore>, signer: Arc<dyn Signer>, bucket: BucketName) -> Self {
        Self {
            store,
            signer,
            bucket,
        }
    }

    /// Google Cloud Storage client authenticated with a service-account key
    pub fn gcs(bucket: BucketName, key: &ServiceAccountKey) -> StorageResult<Self> {
        let gcs = GoogleCloudStorageBuilder::new()
            .with_bucket_name(bucket.as_str())
            .with_service_account_key(key.raw_json())
            .build()
            .map_err(|e| StorageError::InfrastructureError {
                message: "Failed to build GCS client".to_string(),
                source: Some(e.to_string()),
            })?;

        let gcs = Arc::new(gcs);
        Ok(Self::new(gcs.clone(), gcs, bucket))
    }

    /// S3-compatible client using path-style requests
    pub fn s3(bucket: BucketName, settings: &S3Settings) -> StorageResult<Self> {
        let s3 = build_s3_store(&bucket, settings)?;
        Ok(Self::new(s3.clone(), s3, bucket))
    }

    pub fn bucket(&self) -> &BucketName {
        &self.bucket
    }

    fn ensure_bucket(&self, bucket: &BucketName) -> StorageResult<()> {
        if bucket != &self.bucket {
            return Err(StorageError::BucketMismatch {
                expected: self.bucket.clone(),
                actual: bucket.clone(),
            });
        }
        Ok(())
    }

    fn is_path_style(&self, url: &Url) -> bool {
        url.path().starts_with(&format!("/{}/", self.bucket))
    }
}

/// Address `key` in the store exactly as written.
///
/// `Path::parse` rejects empty, `.` and `..` segments and control characters
/// but trims a leading or trailing `/`, so the parsed path is compared with
/// the key as well.
fn object_path(key: &ObjectKey) -> StorageResult<ObjectPath> {
    let path = ObjectPath::parse(key.as_str()).map_err(|e| StorageError::UnsupportedKey {
        key: key.clone(),
        reason: e.to_string(),
    })?;

    let raw: &str = path.as_ref();
    if raw.is_empty() || raw != key.as_str() {
        return Err(StorageError::UnsupportedKey {
            key: key.clone(),
            reason: "empty path segment".to_string(),
        });
    }

    Ok(path)
}

#[async_trait]
impl BlobStorage for ObjectStoreBlobStorage {
    async fn create_object(&self, metadata: &ObjectMetadata, data: Bytes) -> StorageResult<()> {
        self.ensure_bucket(metadata.bucket())?;

        let path = object_path(metadata.key())?;

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, metadata.content_type.clone().into());
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        self.store
            .put_opts(&path, PutPayload::from(data), options)
            .await
            .map_err(|e| StorageError::from_object_store(e, metadata.key(), "create_object"))?;

        Ok(())
    }

    async fn sign_url(&self, request: &SigningRequest) -> StorageResult<Url> {
        let metadata = &request.metadata;
        self.ensure_bucket(metadata.bucket())?;

        if request.style != UrlStyle::PathStyle {
            return Err(StorageError::OperationNotSupported {
                operation: "sign_url".to_string(),
                reason: format!("{} URLs are not supported", request.style.as_str()),
            });
        }

        let expires_in = request.expires_in()?;
        let path = object_path(metadata.key())?;

        let url = self
            .signer
            .signed_url(http::Method::GET, &path, expires_in)
            .await
            .map_err(|e| StorageError::from_object_store(e, metadata.key(), "sign_url"))?;

        if !self.is_path_style(&url) {
            return Err(StorageError::UrlStyleMismatch {
                expected: UrlStyle::PathStyle.as_str().to_string(),
                url: url.to_string(),
            });
        }

        Ok(url)
    }
}

/// Build an S3 client that always addresses the bucket in the URL path
pub fn build_s3_store(bucket: &BucketName, settings: &S3Settings) -> StorageResult<Arc<AmazonS3>> {
    let mut builder = AmazonS3Builder::new()
        .with_bucket_name(bucket.as_str())
        .with_region(&settings.region)
        .with_virtual_hosted_style_request(false);

    if let Some(access_key) = &settings.access_key {
        builder = builder.with_access_key_id(access_key);
    }

    if let Some(secret_key) = &settings.secret_key {
        builder = builder.with_secret_access_key(secret_key);
    }

    if let Some(endpoint) = &settings.endpoint {
        builder = builder
            .with_endpoint(endpoint)
            .with_allow_http(endpoint.starts_with("http://"));
    }

    let store = builder.build().map_err(|e| StorageError::InfrastructureError {
        message: "Failed to build S3 client".to_string(),
        source: Some(e.to_string()),
    })?;

    Ok(Arc::new(store))
}
