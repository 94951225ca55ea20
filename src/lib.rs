pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - core business entities and value objects
pub use domain::{
    BucketName,
    ChunkError,
    DomainValidationError,
    // Models
    ObjectIdentifier,
    // Value objects
    ObjectKey,
    ObjectMetadata,
    SigningRequest,
    // Errors
    StorageError,
    StorageHealth,
    TimeUnit,
    UploadError,
    UploadReceipt,
    UploadedBytes,
    UrlStyle,
};

// Port types - interfaces for external systems
pub use ports::{BlobStorage, ByteStream, UploadService};

// Service implementations - business logic
pub use services::{
    build_identifier, SignedUrlGenerator, StorageClient, UploadIngestor, UploadServiceBuilder,
    UploadServiceImpl,
};

// Application factory and configuration
pub use app::{create_app, AppBuilder, AppConfig, AppError, AppServices, StorageBackend};

// Adapter types - infrastructure implementations
pub use adapters::outbound::{
    credentials::{CredentialProvider, ServiceAccountKey},
    storage::{ObjectStoreBlobStorage, S3Settings},
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        AppBuilder, AppServices, BlobStorage, BucketName, ObjectKey, ObjectStoreBlobStorage,
        StorageBackend, UploadService, UploadServiceImpl,
    };
}
