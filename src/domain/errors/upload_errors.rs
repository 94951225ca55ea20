use thiserror::Error;

use crate::domain::{errors::StorageError, value_objects::ObjectKey};

/// Failure of a single upload request
#[derive(Debug, Clone, Error)]
pub enum UploadError {
    /// No usable storage client; only an operator can fix this
    #[error("Storage is not configured: {reason}")]
    Configuration { reason: String },

    #[error(transparent)]
    Storage(StorageError),

    #[error("Upload of '{key}' dropped {skipped} chunk(s) while reading the request body")]
    PartialIngestion { key: ObjectKey, skipped: usize },

    #[error("Invalid upload request: {message}")]
    InvalidRequest { message: String },
}

impl UploadError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        UploadError::InvalidRequest {
            message: message.into(),
        }
    }
}

impl From<StorageError> for UploadError {
    fn from(err: StorageError) -> Self {
        match err {
            // A key the backend would rewrite is the caller's filename at fault
            StorageError::UnsupportedKey { .. } => UploadError::InvalidRequest {
                message: err.to_string(),
            },
            other => UploadError::Storage(other),
        }
    }
}

/// A chunk of the request body that could not be read
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ChunkError {
    message: String,
}

impl ChunkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_key_is_an_invalid_request() {
        let err = UploadError::from(StorageError::UnsupportedKey {
            key: ObjectKey::new("/report.txt"),
            reason: "empty path segment".to_string(),
        });

        match err {
            UploadError::InvalidRequest { message } => {
                assert!(message.contains("'/report.txt'"));
                assert!(message.contains("empty path segment"));
            }
            other => panic!("Expected invalid request, got {:?}", other),
        }
    }

    #[test]
    fn test_backend_failures_stay_storage_errors() {
        let err = UploadError::from(StorageError::InfrastructureError {
            message: "boom".to_string(),
            source: None,
        });
        assert!(matches!(err, UploadError::Storage(_)));
    }
}
