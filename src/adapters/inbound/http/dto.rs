use chrono::{DateTime, Utc};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::{errors::UploadError, models::StorageHealth};

/// DTO for error responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub error: String,
    pub message: String,
    pub details: Option<HashMap<String, serde_json::Value>>,
    pub timestamp: DateTime<Utc>,
}

/// DTO for the health endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponseDto {
    pub status: String,
    pub storage_available: bool,
    pub storage_error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

// Error response helpers

impl ErrorResponseDto {
    pub fn from_upload_error(error: &UploadError) -> Self {
        let mut details = HashMap::new();

        let kind = match error {
            UploadError::Configuration { .. } => "ConfigurationError",
            UploadError::Storage(_) => "StorageError",
            UploadError::PartialIngestion { key, skipped } => {
                details.insert(
                    "key".to_string(),
                    serde_json::Value::String(key.as_str().to_string()),
                );
                details.insert(
                    "skipped_chunks".to_string(),
                    serde_json::Value::Number((*skipped as u64).into()),
                );
                "PartialIngestionError"
            }
            UploadError::InvalidRequest { .. } => "BadRequest",
        };

        ErrorResponseDto {
            error: kind.to_string(),
            message: error.to_string(),
            details: if details.is_empty() {
                None
            } else {
                Some(details)
            },
            timestamp: Utc::now(),
        }
    }
}

impl From<StorageHealth> for HealthResponseDto {
    fn from(health: StorageHealth) -> Self {
        let (storage_available, storage_error) = match health {
            StorageHealth::Available => (true, None),
            StorageHealth::Unavailable { reason } => (false, Some(reason)),
        };

        HealthResponseDto {
            status: if storage_available { "ok" } else { "degraded" }.to_string(),
            storage_available,
            storage_error,
            timestamp: Utc::now(),
        }
    }
}

/// Convert UploadError to HTTP status codes for API responses
impl From<&UploadError> for StatusCode {
    fn from(err: &UploadError) -> Self {
        match err {
            UploadError::Configuration { .. } => StatusCode::SERVICE_UNAVAILABLE,
            UploadError::Storage(e) => StatusCode::from(e),
            UploadError::PartialIngestion { .. } | UploadError::InvalidRequest { .. } => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{errors::StorageError, value_objects::ObjectKey};

    #[test]
    fn test_status_codes() {
        let config = UploadError::Configuration {
            reason: "missing key".to_string(),
        };
        assert_eq!(StatusCode::from(&config), StatusCode::SERVICE_UNAVAILABLE);

        let storage = UploadError::Storage(StorageError::InfrastructureError {
            message: "boom".to_string(),
            source: None,
        });
        assert_eq!(StatusCode::from(&storage), StatusCode::BAD_GATEWAY);

        let partial = UploadError::PartialIngestion {
            key: ObjectKey::new("a.txt"),
            skipped: 2,
        };
        assert_eq!(StatusCode::from(&partial), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_partial_ingestion_details() {
        let dto = ErrorResponseDto::from_upload_error(&UploadError::PartialIngestion {
            key: ObjectKey::new("a.txt"),
            skipped: 2,
        });

        assert_eq!(dto.error, "PartialIngestionError");
        let details = dto.details.unwrap();
        assert_eq!(details["key"], "a.txt");
        assert_eq!(details["skipped_chunks"], 2);
    }
}
