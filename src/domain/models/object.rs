use bytes::Bytes;

use crate::domain::value_objects::{BucketName, ObjectKey};

/// Content type recorded for every uploaded object, whatever was sent
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Fully qualified location of an object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectIdentifier {
    pub bucket: BucketName,
    pub key: ObjectKey,
}

impl ObjectIdentifier {
    pub fn new(bucket: BucketName, key: ObjectKey) -> Self {
        Self { bucket, key }
    }
}

impl std::fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

/// Metadata sent to the backend when an object is created
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectMetadata {
    pub identifier: ObjectIdentifier,
    pub content_type: String,
}

impl ObjectMetadata {
    pub fn new(identifier: ObjectIdentifier) -> Self {
        Self {
            identifier,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }

    pub fn bucket(&self) -> &BucketName {
        &self.identifier.bucket
    }

    pub fn key(&self) -> &ObjectKey {
        &self.identifier.key
    }
}

/// The complete body of one file part, drained from the request stream
#[derive(Debug, Clone, Default)]
pub struct UploadedBytes {
    data: Bytes,
    chunks_received: usize,
    chunks_skipped: usize,
}

impl UploadedBytes {
    pub fn new(data: Bytes, chunks_received: usize, chunks_skipped: usize) -> Self {
        Self {
            data,
            chunks_received,
            chunks_skipped,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of chunks appended to the buffer, including empty ones
    pub fn chunks_received(&self) -> usize {
        self.chunks_received
    }

    /// Number of chunks that failed to read and were left out
    pub fn chunks_skipped(&self) -> usize {
        self.chunks_skipped
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Bytes {
        self.data
    }
}
