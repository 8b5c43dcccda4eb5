//! Default-value generation for identity fields
//!
//! Fills the timestamp and order-id fields when the caller left them unset.
//! Generation is idempotent: a caller-supplied value is never overwritten.
//! Must run strictly before signing — mutating either field afterwards
//! invalidates the signature.

use crate::types::{effective, HppRequest};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use uuid::Uuid;

/// Wire timestamp format: `YYYYMMDDHHMMSS`.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Current UTC time in wire format.
pub fn generate_timestamp() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

/// A fresh 22-character order id: UUIDv4 bytes, base64url without padding.
/// The alphabet stays within the order-id field's allowed character set.
pub fn generate_order_id() -> String {
    URL_SAFE_NO_PAD.encode(Uuid::new_v4().as_bytes())
}

/// Populate timestamp and order id when absent or empty.
pub fn generate_defaults(request: &mut HppRequest) {
    if effective(&request.timestamp).is_empty() {
        request.timestamp = Some(generate_timestamp());
    }
    if effective(&request.order_id).is_empty() {
        request.order_id = Some(generate_order_id());
    }
}
