use chrono::{DateTime, Utc};
use url::Url;

use crate::domain::models::ObjectIdentifier;

/// Outcome of a successful upload
#[derive(Debug, Clone)]
pub struct UploadReceipt {
    pub url: Url,
    pub identifier: ObjectIdentifier,
    pub size: u64,
    pub chunks_skipped: usize,
    pub expires_at: DateTime<Utc>,
}

/// Whether uploads can currently be served
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageHealth {
    Available,
    Unavailable { reason: String },
}

impl StorageHealth {
    pub fn is_available(&self) -> bool {
        matches!(self, StorageHealth::Available)
    }
}
