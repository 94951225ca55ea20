use crate::domain::{errors::StorageError, value_objects::ObjectKey};

impl StorageError {
    /// Map an object_store failure for `key` during `operation`
    pub fn from_object_store(err: object_store::Error, key: &ObjectKey, operation: &str) -> Self {
        match err {
            object_store::Error::PermissionDenied { .. }
            | object_store::Error::Unauthenticated { .. } => StorageError::AccessDenied {
                key: key.clone(),
                operation: operation.to_string(),
            },
            object_store::Error::NotSupported { .. } | object_store::Error::NotImplemented => {
                StorageError::OperationNotSupported {
                    operation: operation.to_string(),
                    reason: err.to_string(),
                }
            }
            _ => StorageError::InfrastructureError {
                message: format!("Failed to {} '{}': {}", operation, key, err),
                source: Some(err.to_string()),
            },
        }
    }
}

/// Convert domain StorageError to HTTP status codes for API responses
impl From<&StorageError> for http::StatusCode {
    fn from(err: &StorageError) -> Self {
        match err {
            // The backend turned us down; the caller did nothing wrong
            StorageError::AccessDenied { .. } | StorageError::InfrastructureError { .. } => {
                http::StatusCode::BAD_GATEWAY
            }
            StorageError::UnsupportedKey { .. } => http::StatusCode::BAD_REQUEST,
            StorageError::OperationNotSupported { .. } => http::StatusCode::NOT_IMPLEMENTED,
            StorageError::BucketMismatch { .. }
            | StorageError::InvalidExpiry { .. }
            | StorageError::UrlStyleMismatch { .. } => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_errors_become_access_denied() {
        let err = object_store::Error::PermissionDenied {
            path: "2024/report.txt".to_string(),
            source: "forbidden".into(),
        };
        let key = ObjectKey::new("2024/report.txt");

        let mapped = StorageError::from_object_store(err, &key, "create_object");
        assert!(matches!(mapped, StorageError::AccessDenied { .. }));
        assert_eq!(http::StatusCode::from(&mapped), http::StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_other_errors_become_infrastructure_errors() {
        let err = object_store::Error::Generic {
            store: "GCS",
            source: "connection reset".into(),
        };
        let key = ObjectKey::new("report.txt");

        let mapped = StorageError::from_object_store(err, &key, "create_object");
        match mapped {
            StorageError::InfrastructureError { message, source } => {
                assert!(message.contains("report.txt"));
                assert!(source.unwrap().contains("connection reset"));
            }
            other => panic!("Expected infrastructure error, got {}", other),
        }
    }
}
