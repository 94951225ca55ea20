use serde::Deserialize;
use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};
use thiserror::Error;
use tracing::{error, info};

/// Default location of the service-account key
pub const DEFAULT_CREDENTIALS_PATH: &str = "key.json";

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Service account key file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read service account key {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse service account key: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Unsupported credential type '{found}', expected 'service_account'")]
    UnsupportedType { found: String },

    #[error("Service account key is missing '{field}'")]
    MissingField { field: &'static str },
}

/// A parsed service-account key, as downloaded from the cloud console
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type")]
    pub credential_type: String,
    pub project_id: Option<String>,
    pub private_key_id: Option<String>,
    pub private_key: String,
    pub client_email: String,
    pub client_id: Option<String>,
    pub token_uri: Option<String>,

    #[serde(skip)]
    raw: String,
}

impl ServiceAccountKey {
    /// Parse and check a key payload
    pub fn from_json(json: &str) -> Result<Self, CredentialError> {
        let mut key: ServiceAccountKey = serde_json::from_str(json)?;

        if key.credential_type != "service_account" {
            return Err(CredentialError::UnsupportedType {
                found: key.credential_type,
            });
        }
        if key.client_email.trim().is_empty() {
            return Err(CredentialError::MissingField {
                field: "client_email",
            });
        }
        if key.private_key.trim().is_empty() {
            return Err(CredentialError::MissingField {
                field: "private_key",
            });
        }

        key.raw = json.to_string();
        Ok(key)
    }

    /// The payload exactly as read, for clients that parse it themselves
    pub fn raw_json(&self) -> &str {
        &self.raw
    }
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("project_id", &self.project_id)
            .field("private_key_id", &self.private_key_id)
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Read a service-account key file
pub async fn read_service_account_key(path: &Path) -> Result<ServiceAccountKey, CredentialError> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            CredentialError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            CredentialError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    ServiceAccountKey::from_json(&contents)
}

/// Holds the credentials loaded once at startup.
///
/// Loading never fails the process: a missing or broken key file is logged
/// and kept as the reason every later lookup fails.
#[derive(Debug, Clone)]
pub struct CredentialProvider {
    credentials: Result<Arc<ServiceAccountKey>, Arc<CredentialError>>,
}

impl CredentialProvider {
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let credentials = match read_service_account_key(&path).await {
            Ok(key) => {
                info!(
                    path = %path.display(),
                    client_email = %key.client_email,
                    "Loaded service account key"
                );
                Ok(Arc::new(key))
            }
            Err(e @ CredentialError::NotFound { .. }) => {
                error!(error = %e, "Bucket key file not found, storage will be unavailable");
                Err(Arc::new(e))
            }
            Err(e) => {
                error!(error = %e, "Failed to load service account key, storage will be unavailable");
                Err(Arc::new(e))
            }
        };

        Self { credentials }
    }

    /// The loaded key, or why loading failed
    pub fn current_credentials(&self) -> Result<Arc<ServiceAccountKey>, Arc<CredentialError>> {
        self.credentials.clone()
    }
}
