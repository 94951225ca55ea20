pub mod services;
pub mod storage;

// Re-export all port traits for convenience
pub use services::{ByteStream, UploadService};
pub use storage::BlobStorage;
