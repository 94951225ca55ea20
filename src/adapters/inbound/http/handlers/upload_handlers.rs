use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use futures::{StreamExt, TryStreamExt};
use tracing::{info, warn};

use crate::{
    adapters::inbound::http::{dto::ErrorResponseDto, router::AppState},
    domain::errors::{ChunkError, UploadError},
};

/// Name of the multipart part carrying the file
pub const FILE_PART: &str = "file";

fn error_response(error: UploadError) -> (StatusCode, Json<ErrorResponseDto>) {
    let status_code = StatusCode::from(&error);
    if status_code.is_server_error() {
        warn!(error = %error, status = %status_code, "Upload failed");
    }
    (status_code, Json(ErrorResponseDto::from_upload_error(&error)))
}

/// Handle `POST /upload`: store the `file` part and answer with its signed URL
pub async fn upload_file(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<String>, (StatusCode, Json<ErrorResponseDto>)> {
    let upload_service = &app_state.upload_service;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error_response(UploadError::invalid_request(format!(
            "Failed to read multipart body: {}",
            e
        )))
    })? {
        if field.name() != Some(FILE_PART) {
            continue;
        }

        let filename = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                return Err(error_response(UploadError::invalid_request(
                    "The 'file' part has no filename",
                )))
            }
        };

        let content = field
            .map_err(|e| ChunkError::new(e.to_string()))
            .boxed();

        let receipt = upload_service
            .upload(&filename, content)
            .await
            .map_err(error_response)?;

        info!(
            object = %receipt.identifier,
            size = receipt.size,
            expires_at = %receipt.expires_at,
            "Returning signed URL"
        );

        return Ok(Json(receipt.url.to_string()));
    }

    Err(error_response(UploadError::invalid_request(
        "Missing multipart part named 'file'",
    )))
}
