//! # HPP Core
//!
//! Core types, validation and default generation for a hosted-payment-page
//! redirect integration.
//!
//! This crate provides:
//! - Field-set types for HPP requests and responses, with the fixed
//!   upper-case wire-name mapping
//! - Data-driven syntactic validation (length and character-class rules)
//! - Default generation for the timestamp and order-id identity fields
//!
//! ## Example
//!
//! ```rust
//! use hpp_core::{generate_defaults, validate_request, HppRequest};
//!
//! let mut request = HppRequest {
//!     merchant_id: Some("thestore".to_string()),
//!     amount: Some("29900".to_string()),
//!     currency: Some("EUR".to_string()),
//!     ..Default::default()
//! };
//!
//! validate_request(&request).unwrap();
//! generate_defaults(&mut request);
//! assert!(request.timestamp.is_some());
//! ```

pub mod error;
pub mod generation;
pub mod types;
pub mod validation;

// Re-exports for convenience
pub use error::*;
pub use generation::*;
pub use types::*;
pub use validation::*;
