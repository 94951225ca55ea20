mod service_account;

pub use service_account::{
    read_service_account_key, CredentialError, CredentialProvider, ServiceAccountKey,
    DEFAULT_CREDENTIALS_PATH,
};
