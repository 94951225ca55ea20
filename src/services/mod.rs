pub mod identifier;
pub mod ingest;
pub mod signed_url;
pub mod storage_client;
mod upload_service_impl;

pub use identifier::build_identifier;
pub use ingest::{drain, IngestOutcome, UploadIngestor};
pub use signed_url::SignedUrlGenerator;
pub use storage_client::StorageClient;
pub use upload_service_impl::{UploadServiceBuilder, UploadServiceImpl};
