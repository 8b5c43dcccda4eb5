//! Error types for HPP Core

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that can occur while preparing an HPP field set.
#[derive(Debug, Error)]
pub enum HppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
