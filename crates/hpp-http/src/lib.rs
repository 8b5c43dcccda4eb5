//! # HPP HTTP Transport
//!
//! JSON codec and HTTP transport layer for the hosted-payment-page
//! redirect integration.
//!
//! This crate provides:
//! - The codec sequencing the outbound pipeline (validate → default → sign
//!   → encode → serialize) and the inbound one (deserialize → decode →
//!   verify)
//! - A reqwest-based client for server-initiated posts to the payment page
//! - An axum extractor for the merchant's response-callback endpoint
//!
//! ## Outbound example
//!
//! ```ignore
//! use hpp_http::request_to_json;
//! use hpp_canonical::Charset;
//! use hpp_core::HppRequest;
//!
//! let mut request = HppRequest { /* ... */ };
//! let json = request_to_json(&mut request, secret, Charset::Utf8)?;
//! // hand `json` to the page that posts it to the payment service
//! ```
//!
//! ## Inbound example
//!
//! ```ignore
//! use hpp_http::response_from_json;
//! use hpp_canonical::Charset;
//!
//! let response = response_from_json(&body, secret, Charset::Utf8)?;
//! // a signature mismatch surfaces as HppHttpError::SignatureMismatch
//! ```

mod client;
mod codec;
mod error;
mod extractors;

pub use client::{HppClient, SANDBOX_URL};
pub use codec::{
    decode_and_verify_response, request_from_json, request_to_json, response_from_json,
    response_to_json,
};
pub use error::{ErrorResponse, HppHttpError};
pub use extractors::HppResponseExtractor;
