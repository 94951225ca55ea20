use crate::domain::value_objects::{BucketName, ObjectKey};

/// Errors reported by the storage backend or by the storage adapter
#[derive(Debug, Clone)]
pub enum StorageError {
    /// The backend refused the credentials or the operation
    AccessDenied { key: ObjectKey, operation: String },

    /// The identifier names a bucket the client is not bound to
    BucketMismatch {
        expected: BucketName,
        actual: BucketName,
    },

    /// Requested expiry is outside what the backend can sign
    InvalidExpiry { seconds: u64, max_seconds: u64 },

    /// The backend produced a URL that does not have the requested style
    UrlStyleMismatch { expected: String, url: String },

    /// The backend cannot address an object under exactly this key
    UnsupportedKey { key: ObjectKey, reason: String },

    /// Operation not supported by the backend
    OperationNotSupported { operation: String, reason: String },

    /// Infrastructure error with external source
    InfrastructureError {
        message: String,
        source: Option<String>, // Store error as string to allow Clone
    },
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::AccessDenied { key, operation } => {
                write!(
                    f,
                    "Access denied for operation '{}' on object: {}",
                    operation, key
                )
            }
            StorageError::BucketMismatch { expected, actual } => {
                write!(
                    f,
                    "Storage client is bound to bucket '{}', not '{}'",
                    expected, actual
                )
            }
            StorageError::InvalidExpiry {
                seconds,
                max_seconds,
            } => {
                write!(
                    f,
                    "Invalid signed URL expiry: {} seconds (must be between 1 and {})",
                    seconds, max_seconds
                )
            }
            StorageError::UrlStyleMismatch { expected, url } => {
                write!(f, "Expected a {} signed URL, got: {}", expected, url)
            }
            StorageError::UnsupportedKey { key, reason } => {
                write!(f, "Object key '{}' cannot be stored as-is: {}", key, reason)
            }
            StorageError::OperationNotSupported { operation, reason } => {
                write!(f, "Operation '{}' not supported: {}", operation, reason)
            }
            StorageError::InfrastructureError { message, .. } => {
                write!(f, "Infrastructure error: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
