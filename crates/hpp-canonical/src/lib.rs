//! # HPP Canonical
//!
//! Canonical hash-string assembly, integrity signing and transport
//! transcoding for the hosted-payment-page redirect integration.
//!
//! This crate provides:
//! - The two-stage SHA-1 digest the remote protocol requires
//! - Request and response canonical-string assembly with the fixed field
//!   order and conditional-inclusion rules
//! - The per-field base64 transcoder with explicit charset handling
//!
//! ## Signing rules
//!
//! 1. Canonical field order is fixed; segments join with `.`
//! 2. Absent fields read as empty strings, never as errors
//! 3. Signing operates on plain values only — transcode after signing on
//!    the outbound path, and before verification on the inbound path
//! 4. The signature field is never part of the string it signs
//!
//! ## Example
//!
//! ```rust
//! use hpp_canonical::{sign_request, verify_response, Charset, Direction, transcode_request};
//! use hpp_core::HppRequest;
//!
//! let mut request = HppRequest {
//!     merchant_id: Some("thestore".to_string()),
//!     order_id: Some("ORD453-11".to_string()),
//!     amount: Some("29900".to_string()),
//!     currency: Some("EUR".to_string()),
//!     timestamp: Some("20130814122239".to_string()),
//!     ..Default::default()
//! };
//!
//! // Sign on plain values, then encode for transport.
//! sign_request(&mut request, "mysecret");
//! transcode_request(&mut request, Direction::ToTransport, Charset::Utf8).unwrap();
//! ```

mod canonical;
mod error;
mod hash;
mod transcode;

pub use canonical::*;
pub use error::*;
pub use hash::*;
pub use transcode::*;
