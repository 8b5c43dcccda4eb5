//! Two-stage SHA-1 digest for HPP signatures
//!
//! The remote protocol fixes the construction: hash the canonical string,
//! hex-encode, then hash `<hex>.<secret>` and hex-encode again. This is not
//! an HMAC and must not be replaced by one.

use sha1::{Digest, Sha1};
use std::fmt::Write;

/// Hash raw bytes with SHA-1.
///
/// Returns a 40-character lowercase hex string.
///
/// # Example
///
/// ```rust
/// use hpp_canonical::sha1_hex;
///
/// let hash = sha1_hex(b"hello");
/// assert_eq!(hash.len(), 40);
/// assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
pub fn sha1_hex(data: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(data);
    let result = hasher.finalize();

    hex_encode(&result)
}

/// Compute the two-stage keyed digest over a canonical string.
///
/// ```text
/// signature = sha1_hex(sha1_hex(message) + "." + secret)
/// ```
///
/// # Example
///
/// ```rust
/// use hpp_canonical::generate_hash;
///
/// let hash = generate_hash("20130814122239.thestore.ORD453-11.29900.EUR", "mysecret");
/// assert_eq!(hash, "cc72c08e529b3bc153481eda9533b815cef29de3");
/// ```
pub fn generate_hash(message: &str, secret: &str) -> String {
    let first_pass = sha1_hex(message.as_bytes());
    let keyed = format!("{first_pass}.{secret}");
    sha1_hex(keyed.as_bytes())
}

/// Recompute the signature for a canonical string and compare it to the
/// received one, case-insensitively and in constant time.
pub fn verify_hash(message: &str, secret: &str, received: &str) -> bool {
    let computed = generate_hash(message, secret);
    constant_time_compare(&computed, &received.to_lowercase())
}

/// Constant-time string comparison to prevent timing attacks
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}

/// Convert bytes to lowercase hex string
fn hex_encode(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        write!(hex, "{:02x}", byte).unwrap();
    }
    hex
}

/// Validate a SHA-1 signature string format: 40 lowercase hex characters.
pub fn is_valid_signature(hash: &str) -> bool {
    hash.len() == 40
        && hash
            .chars()
            .all(|c| matches!(c, '0'..='9' | 'a'..='f'))
}
