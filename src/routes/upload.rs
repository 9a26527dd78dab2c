use std::path::Path;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::types::UploadResponse;

/// Multipart field carrying the file.
const FILE_FIELD: &str = "file";

/// `POST /api/admin/upload`: stores one image and returns its public URL.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UploadResponse>> {
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let cfg = &state.config.uploads;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e.body_text())))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let original = field.file_name().map(str::to_string).unwrap_or_default();
        let safe_name = sanitize_file_name(&original)
            .ok_or_else(|| AppError::BadRequest("File name is missing".to_string()))?;
        if !has_allowed_extension(&safe_name, &cfg.allowed_extensions) {
            return Err(AppError::validation(
                "file",
                format!("Only {} files are allowed", cfg.allowed_extensions.join(", ")),
            ));
        }

        let bytes = field.bytes().await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge { max_bytes: cfg.max_file_size }
            } else {
                AppError::BadRequest(format!("Failed to read upload: {}", e.body_text()))
            }
        })?;
        if bytes.len() > cfg.max_file_size {
            return Err(AppError::PayloadTooLarge { max_bytes: cfg.max_file_size });
        }
        if bytes.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
        }

        let stored_name = format!("{}_{}", chrono::Utc::now().timestamp_millis(), safe_name);
        tokio::fs::create_dir_all(&cfg.dir).await?;
        tokio::fs::write(Path::new(&cfg.dir).join(&stored_name), &bytes).await?;
        tracing::info!(file = %stored_name, size = bytes.len(), "upload stored");

        return Ok(Json(UploadResponse { url: format!("/uploads/{}", stored_name) }));
    }

    Err(AppError::BadRequest("No file provided".to_string()))
}

/// Reduces a client-supplied file name to its last path component with
/// everything outside `[A-Za-z0-9._-]` replaced by `_`.
///
/// Returns `None` when nothing usable remains.
pub fn sanitize_file_name(name: &str) -> Option<String> {
    let last = name.rsplit(['/', '\\']).next().unwrap_or("");
    let cleaned: String = last
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '_') {
        None
    } else {
        Some(cleaned)
    }
}

fn has_allowed_extension(name: &str, allowed: &[String]) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)))
}
