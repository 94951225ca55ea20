use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use std::{fmt::Display, sync::Arc};
use tracing::{debug, trace, warn};

use crate::{
    domain::{
        errors::UploadError,
        models::{ObjectMetadata, UploadedBytes},
    },
    ports::{services::ByteStream, storage::BlobStorage},
};

/// Drain a chunk stream into one contiguous buffer.
///
/// Returns only after the stream has signalled completion. Chunks are
/// appended in arrival order; a chunk that arrives as an error is logged and
/// left out, and counted in [`UploadedBytes::chunks_skipped`].
pub async fn drain<S, E>(mut stream: S) -> UploadedBytes
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: Display,
{
    let mut buffer = BytesMut::new();
    let mut received = 0;
    let mut skipped = 0;

    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(chunk) => {
                trace!(chunk = received, len = chunk.len(), "Appending body chunk");
                buffer.extend_from_slice(&chunk);
                received += 1;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read request body chunk, skipping it");
                skipped += 1;
            }
        }
        // `chunk` is dropped here, before the next one is polled
    }

    UploadedBytes::new(buffer.freeze(), received, skipped)
}

/// What ingestion wrote to storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOutcome {
    pub size: u64,
    pub chunks_received: usize,
    pub chunks_skipped: usize,
}

/// Turns one file part into a stored object
#[derive(Clone)]
pub struct UploadIngestor {
    storage: Arc<dyn BlobStorage>,
    reject_partial_uploads: bool,
}

impl UploadIngestor {
    pub fn new(storage: Arc<dyn BlobStorage>) -> Self {
        Self {
            storage,
            reject_partial_uploads: false,
        }
    }

    /// Fail the upload instead of storing it when any chunk was skipped
    pub fn reject_partial_uploads(mut self, reject: bool) -> Self {
        self.reject_partial_uploads = reject;
        self
    }

    /// Drain `content` completely, then create the object from the full buffer
    pub async fn ingest(
        &self,
        metadata: &ObjectMetadata,
        content: ByteStream<'_>,
    ) -> Result<IngestOutcome, UploadError> {
        let uploaded = drain(content).await;

        let outcome = IngestOutcome {
            size: uploaded.len() as u64,
            chunks_received: uploaded.chunks_received(),
            chunks_skipped: uploaded.chunks_skipped(),
        };

        if outcome.chunks_skipped > 0 {
            if self.reject_partial_uploads {
                return Err(UploadError::PartialIngestion {
                    key: metadata.key().clone(),
                    skipped: outcome.chunks_skipped,
                });
            }
            warn!(
                key = %metadata.key(),
                skipped = outcome.chunks_skipped,
                size = outcome.size,
                "Storing upload with missing chunks"
            );
        }

        debug!(
            object = %metadata.identifier,
            size = outcome.size,
            chunks = outcome.chunks_received,
            content_type = %metadata.content_type,
            "Creating object"
        );

        self.storage
            .create_object(metadata, uploaded.into_bytes())
            .await?;

        Ok(outcome)
    }
}
