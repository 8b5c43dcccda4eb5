//! Error types for HPP Canonical

use thiserror::Error;

/// Errors raised while transcoding a field set for transport.
///
/// Every variant that concerns a value names the wire field (or
/// supplementary key) it failed on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranscodeError {
    #[error("Unknown charset name: '{0}'")]
    UnknownCharset(String),

    #[error("{field}: value cannot be represented in {charset}")]
    Unencodable {
        field: String,
        charset: &'static str,
    },

    #[error("{field}: transport value is not valid base64: {reason}")]
    InvalidBase64 { field: String, reason: String },

    #[error("{field}: decoded bytes are not valid {charset}")]
    Undecodable {
        field: String,
        charset: &'static str,
    },
}
