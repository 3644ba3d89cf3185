//! Handlers for image uploads.
//!
//! Files land on local disk under the configured uploads directory with
//! random uuid filenames (no collisions, no user-controlled paths) and are
//! served statically under `/uploads`.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;
use wom_core::uploads::{validate_upload, UploadError};

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// URL prefix uploaded files are served under.
pub const UPLOADS_URL_PREFIX: &str = "/uploads/";

/// Response payload for a successful upload.
#[derive(Debug, Serialize)]
pub struct UploadResult {
    /// Public URL of the stored file.
    pub url: String,
}

/// POST /api/uploads/upload
///
/// Accept a multipart image upload (<= 5MB, png/jpeg/webp sniffed from the
/// bytes) and return its public URL.
pub async fn upload(
    auth: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<UploadResult>>)> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
        .ok_or_else(|| AppError::BadRequest("No file in multipart upload".to_string()))?;

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let info = validate_upload(&data, state.config.max_upload_bytes).map_err(|e| match e {
        UploadError::TooLarge { .. } | UploadError::UnsupportedType | UploadError::Unreadable => {
            AppError::BadRequest(e.to_string())
        }
    })?;

    tokio::fs::create_dir_all(&state.config.uploads_dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create uploads dir: {e}")))?;

    let filename = format!("{}.{}", Uuid::new_v4(), info.extension);
    let dest = state.config.uploads_dir.join(&filename);
    tokio::fs::write(&dest, &data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

    let url = format!("{UPLOADS_URL_PREFIX}{filename}");

    tracing::info!(
        user_id = auth.user_id,
        size = data.len(),
        mime = info.mime,
        %url,
        "Image uploaded",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UploadResult { url },
        }),
    ))
}

/// Remove a previously uploaded file given its public URL.
///
/// Only URLs inside the uploads prefix are touched, and the filename is
/// sanitized against path traversal. Removal is best-effort: a missing file
/// is not an error, and failures are logged rather than surfaced (the owning
/// record is already gone).
pub async fn remove_uploaded_file(config: &ServerConfig, url: &str) {
    let Some(filename) = url.strip_prefix(UPLOADS_URL_PREFIX) else {
        return;
    };
    if filename.is_empty() || filename.contains('/') || filename.contains("..") {
        return;
    }

    let path = config.uploads_dir.join(filename);
    match tokio::fs::remove_file(&path).await {
        Ok(()) => tracing::info!(?path, "Removed uploaded file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(?path, error = %e, "Failed to remove uploaded file"),
    }
}
