pub mod error;
pub mod object_store_blob_storage;

pub use object_store_blob_storage::{build_s3_store, ObjectStoreBlobStorage, S3Settings};
