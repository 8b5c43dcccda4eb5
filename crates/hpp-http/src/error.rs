//! HTTP and codec error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hpp_canonical::TranscodeError;
use hpp_core::ValidationError;
use serde::Serialize;
use thiserror::Error;

/// Errors for the HPP codec and transport layer.
#[derive(Debug, Error)]
pub enum HppHttpError {
    #[error("Failed to parse payload: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Transcoding error: {0}")]
    Transcode(#[from] TranscodeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The recomputed response signature did not match the received one.
    /// The response must not be honored.
    #[error("Response signature verification failed")]
    SignatureMismatch,

    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for HppHttpError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            HppHttpError::ParseError(_) => (StatusCode::BAD_REQUEST, "PARSE_ERROR"),
            HppHttpError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            HppHttpError::Transcode(_) => (StatusCode::BAD_REQUEST, "TRANSCODE_ERROR"),
            HppHttpError::Json(_) => (StatusCode::BAD_REQUEST, "JSON_ERROR"),
            HppHttpError::SignatureMismatch => (StatusCode::UNAUTHORIZED, "SIGNATURE_MISMATCH"),
            HppHttpError::RequestError(_) => (StatusCode::BAD_GATEWAY, "REQUEST_ERROR"),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
