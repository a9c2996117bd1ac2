//! Error type shared by the HTTP layer.
//!
//! Storage failures never reach this type: the key-value adapter swallows
//! them. `SiteError` covers the failures a request can actually observe.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("Admin login required")]
    Unauthorized,

    #[error("Inline editing is disabled")]
    InlineEditDisabled,

    #[error("Unknown page: {0}")]
    UnknownPage(String),

    #[error("Unknown namespace: {0}")]
    UnknownNamespace(String),

    #[error("Unknown field {field} in namespace {namespace}")]
    UnknownField { namespace: String, field: String },

    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SiteError {
    pub fn status(&self) -> StatusCode {
        match self {
            SiteError::IncorrectPassword | SiteError::Unauthorized => StatusCode::UNAUTHORIZED,
            SiteError::InlineEditDisabled => StatusCode::FORBIDDEN,
            SiteError::UnknownPage(_)
            | SiteError::UnknownNamespace(_)
            | SiteError::UnknownField { .. } => StatusCode::NOT_FOUND,
            SiteError::InvalidValue(_) | SiteError::Upload(_) => StatusCode::BAD_REQUEST,
            SiteError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (
            status,
            Json(serde_json::json!({ "ok": false, "message": self.to_string() })),
        )
            .into_response()
    }
}
