use std::{path::PathBuf, sync::Arc, time::Duration};
use tracing::{error, info};

use crate::{
    adapters::{
        inbound::http::router::{AppState, DEFAULT_MAX_UPLOAD_BYTES},
        outbound::{
            credentials::{CredentialProvider, DEFAULT_CREDENTIALS_PATH},
            storage::{ObjectStoreBlobStorage, S3Settings},
        },
    },
    domain::{
        models::{TimeUnit, MAX_SIGNED_URL_EXPIRY},
        value_objects::BucketName,
    },
    ports::storage::BlobStorage,
    services::{StorageClient, UploadServiceBuilder, UploadServiceImpl},
};

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bucket: String,
    pub subdirectory: Option<String>,
    pub storage_backend: StorageBackend,
    pub url_expiry: Duration,
    pub reject_partial_uploads: bool,
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            subdirectory: None,
            storage_backend: StorageBackend::Gcs {
                credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_PATH),
            },
            url_expiry: Duration::from_secs(600),
            reject_partial_uploads: false,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Storage backend configuration
#[derive(Debug, Clone)]
pub enum StorageBackend {
    /// Google Cloud Storage, authenticated with a service-account key file
    Gcs { credentials_path: PathBuf },
    /// S3-compatible storage, addressed path-style
    S3(S3Settings),
}

/// Application services container
pub struct AppServices {
    pub upload_service: UploadServiceImpl,
    pub max_upload_bytes: usize,
}

impl AppServices {
    /// Router state wrapping these services
    pub fn into_state(self) -> AppState {
        AppState::new(Arc::new(self.upload_service)).with_max_upload_bytes(self.max_upload_bytes)
    }
}

/// Application builder for dependency injection
pub struct AppBuilder {
    config: AppConfig,
    storage: Option<Arc<dyn BlobStorage>>,
}

impl AppBuilder {
    /// Create a new application builder
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            storage: None,
        }
    }

    /// Configure the application with custom settings
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.config.bucket = bucket.into();
        self
    }

    pub fn with_subdirectory(mut self, subdirectory: Option<String>) -> Self {
        self.config.subdirectory = subdirectory;
        self
    }

    /// Configure storage backend
    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage_backend = backend;
        self
    }

    /// Use an already constructed storage client instead of the configured backend
    pub fn with_storage(mut self, storage: Arc<dyn BlobStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_url_expiry(mut self, url_expiry: Duration) -> Self {
        self.config.url_expiry = url_expiry;
        self
    }

    pub fn with_reject_partial_uploads(mut self, reject: bool) -> Self {
        self.config.reject_partial_uploads = reject;
        self
    }

    /// Build the complete application with services
    pub async fn build(self) -> Result<AppServices, AppError> {
        let bucket = BucketName::new(self.config.bucket.clone()).map_err(|e| {
            AppError::Configuration {
                message: format!("Invalid bucket name '{}': {}", self.config.bucket, e),
            }
        })?;

        let expiry = self.config.url_expiry;
        if expiry.is_zero() || expiry > MAX_SIGNED_URL_EXPIRY {
            return Err(AppError::Configuration {
                message: format!(
                    "URL expiry must be between 1 and {} seconds, got {}",
                    MAX_SIGNED_URL_EXPIRY.as_secs(),
                    expiry.as_secs()
                ),
            });
        }

        let storage = self.create_storage_client(&bucket).await;

        let upload_service = UploadServiceBuilder::new()
            .bucket(bucket)
            .subdirectory(self.config.subdirectory.clone())
            .storage_client(storage)
            .url_expiry(expiry.as_secs(), TimeUnit::Seconds)
            .reject_partial_uploads(self.config.reject_partial_uploads)
            .build()
            .map_err(|e| AppError::ServiceInit {
                message: e.to_string(),
            })?;

        Ok(AppServices {
            upload_service,
            max_upload_bytes: self.config.max_upload_bytes,
        })
    }

    /// Create the storage client. Failures leave it unavailable rather than
    /// aborting startup.
    async fn create_storage_client(&self, bucket: &BucketName) -> StorageClient {
        if let Some(storage) = &self.storage {
            return StorageClient::ready(storage.clone());
        }

        let storage = match &self.config.storage_backend {
            StorageBackend::Gcs { credentials_path } => {
                let provider = CredentialProvider::load(credentials_path.clone()).await;
                match provider.current_credentials() {
                    Ok(key) => ObjectStoreBlobStorage::gcs(bucket.clone(), &key),
                    // Already logged by the provider
                    Err(e) => return StorageClient::unavailable(e.to_string()),
                }
            }
            StorageBackend::S3(settings) => ObjectStoreBlobStorage::s3(bucket.clone(), settings),
        };

        match storage {
            Ok(storage) => {
                info!(bucket = %bucket, "Storage client ready");
                StorageClient::ready(Arc::new(storage))
            }
            Err(e) => {
                error!(bucket = %bucket, error = %e, "Failed to create storage client");
                StorageClient::unavailable(e.to_string())
            }
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Service initialization error: {message}")]
    ServiceInit { message: String },
}

/// Build the application from a complete configuration
pub async fn create_app(config: AppConfig) -> Result<AppServices, AppError> {
    AppBuilder::new().with_config(config).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::models::StorageHealth, ports::services::UploadService};

    #[tokio::test]
    async fn test_missing_credentials_leave_storage_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let app = AppBuilder::new()
            .with_bucket("mybucket")
            .with_storage_backend(StorageBackend::Gcs {
                credentials_path: dir.path().join("key.json"),
            })
            .build()
            .await
            .unwrap();

        match app.upload_service.storage_health() {
            StorageHealth::Unavailable { reason } => assert!(reason.contains("key.json")),
            StorageHealth::Available => panic!("Expected storage to be unavailable"),
        }
    }

    #[tokio::test]
    async fn test_s3_backend_is_ready() {
        let app = AppBuilder::new()
            .with_bucket("mybucket")
            .with_subdirectory(Some("2024".to_string()))
            .with_storage_backend(StorageBackend::S3(S3Settings {
                endpoint: Some("http://localhost:9000".to_string()),
                region: "us-east-1".to_string(),
                access_key: Some("test-access-key".to_string()),
                secret_key: Some("test-secret-key".to_string()),
            }))
            .build()
            .await
            .unwrap();

        assert!(app.upload_service.storage_health().is_available());
        assert_eq!(app.upload_service.bucket().as_str(), "mybucket");
        assert_eq!(app.upload_service.subdirectory(), Some("2024"));
    }

    #[tokio::test]
    async fn test_invalid_bucket_is_fatal() {
        let result = AppBuilder::new().with_bucket("My_Bucket").build().await;
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_invalid_expiry_is_fatal() {
        let result = AppBuilder::new()
            .with_bucket("mybucket")
            .with_url_expiry(Duration::ZERO)
            .build()
            .await;
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }
}
