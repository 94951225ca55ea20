use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{health, upload_file};
use crate::ports::services::UploadService;

/// Default cap on the size of an upload request body
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub upload_service: Arc<dyn UploadService>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(upload_service: Arc<dyn UploadService>) -> Self {
        Self {
            upload_service,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}

/// Create the main application router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route("/upload", post(upload_file).layer(body_limit))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        // Add state for dependency injection
        .with_state(state)
}
