use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// The primary error type for the application.
///
/// Every failure a handler can produce ends up here and is rendered as
/// `{"error": <message>, "code": <CODE>, "status": <u16>, "timestamp": <rfc3339>}`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing input.
    #[error("{0}")]
    BadRequest(String),
    /// A specific field failed validation.
    #[error("{field}: {message}")]
    Validation { field: String, message: String },
    /// No `Authorization` header on an admin route.
    #[error("No token provided")]
    Unauthenticated,
    /// Bad signature, unexpected algorithm, malformed or expired token.
    #[error("Invalid token")]
    InvalidToken,
    /// Unknown username or wrong password at login.
    #[error("Invalid username or password")]
    InvalidCredentials,
    /// The addressed record does not exist.
    #[error("{0} not found")]
    NotFound(String),
    #[error("Username is already taken")]
    DuplicateUsername,
    #[error("Email address is already in use")]
    DuplicateEmail,
    /// Uploaded file exceeds the configured size.
    #[error("File exceeds the maximum size of {max_bytes} bytes")]
    PayloadTooLarge { max_bytes: usize },
    /// Unexpected database failure. The message is logged, never returned.
    #[error("Database error: {0}")]
    Database(String),
    /// Unexpected failure outside the database.
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
    #[error("I/O error: {0}")]
    Io(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_)
            | AppError::Validation { .. }
            | AppError::DuplicateUsername
            | AppError::DuplicateEmail => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated | AppError::InvalidToken | AppError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Database(_) | AppError::Internal(_) | AppError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::Unauthenticated => "UNAUTHENTICATED",
            AppError::InvalidToken => "INVALID_TOKEN",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::DuplicateUsername => "DUPLICATE_USERNAME",
            AppError::DuplicateEmail => "DUPLICATE_EMAIL",
            AppError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
            AppError::Io(_) => "IO_ERROR",
        }
    }

    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        AppError::Validation { field: field.to_string(), message: message.into() }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let mut body = match &self {
            AppError::Database(_) | AppError::Internal(_) | AppError::Io(_) => {
                let error_id = uuid::Uuid::new_v4();
                tracing::error!(%error_id, "{}", self);
                json!({
                    "error": "An internal server error occurred",
                    "error_id": error_id.to_string(),
                })
            }
            _ => json!({ "error": self.to_string() }),
        };
        body["code"] = json!(code);
        body["status"] = json!(status.as_u16());
        body["timestamp"] = json!(chrono::Utc::now().to_rfc3339());

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record".to_string()),
            sqlx::Error::Database(db_err) => match db_err.kind() {
                // Column constraints mirror request validation
                sqlx::error::ErrorKind::CheckViolation => {
                    AppError::BadRequest("Value violates a column constraint".to_string())
                }
                _ => AppError::Database(db_err.message().to_string()),
            },
            _ => AppError::Database(err.to_string()),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(format!("{}: {}", err.kind(), err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(format!("Invalid ID: {}", rejection.body_text()))
    }
}

/// A type alias for `Result<T, AppError>`, used throughout the application.
pub type AppResult<T> = Result<T, AppError>;

/// An extension trait for `Option` that provides a convenient way to convert
/// an `Option` to a `Result` with a `NotFound` error.
pub trait OptionExt<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T> {
        self.ok_or_else(|| AppError::NotFound(entity.to_string()))
    }
}

/// Helpers for field-level request validation.
pub mod validation {
    use super::*;

    pub fn require_non_empty(value: &str, field: &str) -> AppResult<()> {
        if value.trim().is_empty() {
            return Err(AppError::validation(field, "must not be empty"));
        }
        Ok(())
    }

    /// Longest name, title, username or email the schema accepts.
    pub const MAX_TEXT_LEN: usize = 255;

    /// Length in characters after trimming, matching SQLite's `length()`.
    pub fn max_len(value: &str, max: usize, field: &str) -> AppResult<()> {
        let len = value.trim().chars().count();
        if len > max {
            return Err(AppError::validation(field, format!("must be at most {} characters, got {}", max, len)));
        }
        Ok(())
    }

    pub fn validate_price(value: f64) -> AppResult<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(AppError::validation("price", format!("must be a non-negative number, got {}", value)));
        }
        Ok(())
    }

    /// Accepts `None`; otherwise the value must lie inside `min..=max`.
    pub fn validate_range(value: Option<f64>, min: f64, max: f64, field: &str) -> AppResult<()> {
        if let Some(v) = value {
            if !v.is_finite() || v < min || v > max {
                return Err(AppError::validation(field, format!("must be between {} and {}, got {}", min, max, v)));
            }
        }
        Ok(())
    }

    /// Rudimentary shape check: something before and after a single `@`.
    pub fn validate_email(value: &str) -> AppResult<()> {
        require_non_empty(value, "email")?;
        match value.trim().split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => Ok(()),
            _ => Err(AppError::validation("email", "must be a valid email address")),
        }
    }
}
