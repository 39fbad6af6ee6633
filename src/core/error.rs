use std::collections::BTreeMap;

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::{json, Value};

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Request field validation failures, one message per offending field
    #[error("Validation failed for {} field(s)", .0.len())]
    FieldValidation(BTreeMap<String, String>),

    /// Request could not be read (malformed JSON, bad path or query parameter)
    #[error("{0}")]
    BadRequest(String),

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness violation
    #[error("{0}")]
    Conflict(String),

    /// Database operation errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Single-field validation failure
    pub fn invalid_field(field: impl Into<String>, msg: impl Into<String>) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.into(), msg.into());
        AppError::FieldValidation(errors)
    }

    /// Message safe to show to the caller. Server-side failures are
    /// reduced to a generic message.
    pub fn public_message(&self) -> String {
        match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) | AppError::Conflict(msg) => {
                msg.clone()
            }
            AppError::FieldValidation(_) => "Validation failed".to_string(),
            AppError::Database(_) | AppError::Configuration(_) | AppError::Internal(_) => {
                "Internal server error".to_string()
            }
        }
    }

    /// JSON body for this error.
    ///
    /// Field validation failures render as `{field: message}`; everything
    /// else renders as `{status, error, path}` (path only when known).
    pub fn to_body(&self, path: Option<&str>) -> Value {
        if let AppError::FieldValidation(errors) = self {
            return json!(errors);
        }

        let mut body = json!({
            "status": self.status_code().as_u16(),
            "error": self.public_message(),
        });
        if let Some(path) = path {
            body["path"] = Value::String(path.to_string());
        }
        body
    }

    /// Whether the body carries `status`/`error`/`path`
    pub fn carries_status(&self) -> bool {
        !matches!(self, AppError::FieldValidation(_))
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.to_body(None))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::FieldValidation(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
