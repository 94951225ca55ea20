use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tracing::{debug, error};

use crate::{
    domain::{errors::UploadError, models::StorageHealth},
    ports::storage::BlobStorage,
};

/// The storage client as left by startup: either usable, or the reason it is not
pub enum StorageClient {
    Ready(Arc<dyn BlobStorage>),
    Unavailable {
        reason: String,
        reported: AtomicBool,
    },
}

impl StorageClient {
    pub fn ready(storage: Arc<dyn BlobStorage>) -> Self {
        StorageClient::Ready(storage)
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        StorageClient::Unavailable {
            reason: reason.into(),
            reported: AtomicBool::new(false),
        }
    }

    /// Get the client, or a configuration error when startup left none.
    ///
    /// The first failed lookup is logged as an error, later ones at debug level.
    pub fn get(&self) -> Result<&Arc<dyn BlobStorage>, UploadError> {
        match self {
            StorageClient::Ready(storage) => Ok(storage),
            StorageClient::Unavailable { reason, reported } => {
                if !reported.swap(true, Ordering::Relaxed) {
                    error!(reason = %reason, "Upload requested but storage client is unavailable");
                } else {
                    debug!(reason = %reason, "Storage client still unavailable");
                }
                Err(UploadError::Configuration {
                    reason: reason.clone(),
                })
            }
        }
    }

    pub fn health(&self) -> StorageHealth {
        match self {
            StorageClient::Ready(_) => StorageHealth::Available,
            StorageClient::Unavailable { reason, .. } => StorageHealth::Unavailable {
                reason: reason.clone(),
            },
        }
    }
}

impl std::fmt::Debug for StorageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageClient::Ready(_) => f.write_str("StorageClient::Ready"),
            StorageClient::Unavailable { reason, .. } => f
                .debug_struct("StorageClient::Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}
