//! Authentication Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors raised while building the auth context of a request.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Role header is not valid UTF-8.
    #[error("Invalid {0} header")]
    InvalidHeader(&'static str),

    /// Role header names a role outside the closed role set.
    #[error("Invalid role header: {0}")]
    UnknownRole(#[from] pulse_common::Error),
}

/// Error response body for JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable error message.
    pub message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let code = match &self {
            Self::InvalidHeader(_) => "INVALID_AUTH_HEADER",
            Self::UnknownRole(_) => "UNKNOWN_ROLE",
        };

        let body = Json(ErrorResponse {
            error: code.to_string(),
            message: self.to_string(),
        });

        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

/// Result type for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;
