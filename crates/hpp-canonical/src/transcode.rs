//! Per-field transport transcoding
//!
//! Applies standard base64 independently to every populated field value
//! (and to every value in the supplementary and TSS maps, preserving keys),
//! in a fixed per-field traversal. Absent fields are skipped, never
//! invented; partially-populated field sets are expected.
//!
//! The caller-declared charset converts between text and the bytes that are
//! base64-wrapped. The same charset must be threaded through both
//! directions — a mismatch corrupts data without an error, so the charset
//! is an explicit parameter, never re-derived per call.
//!
//! Error policy: fail fast. The first value that cannot be represented in
//! the declared charset, or whose transport form is not valid base64,
//! aborts the pass with an error naming the field. The field set may be
//! partially transcoded at that point and must be discarded.

use crate::error::TranscodeError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hpp_core::types::{HppRequest, HppResponse};
use std::collections::HashMap;
use std::str::FromStr;

/// Which way the transcoding pass runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Plain values -> base64 transport form.
    ToTransport,
    /// Base64 transport form -> plain values.
    FromTransport,
}

/// Character encodings the transcoder supports.
///
/// The charset is a caller-supplied configuration value; an unrecognized
/// name is a configuration error, not a per-field one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    #[default]
    Utf8,
    Iso8859_1,
}

impl Charset {
    /// Canonical name, as accepted by [`Charset::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Iso8859_1 => "ISO-8859-1",
        }
    }

    fn encode(self, field: &str, value: &str) -> Result<Vec<u8>, TranscodeError> {
        match self {
            Charset::Utf8 => Ok(value.as_bytes().to_vec()),
            Charset::Iso8859_1 => value
                .chars()
                .map(|c| {
                    u8::try_from(u32::from(c)).map_err(|_| TranscodeError::Unencodable {
                        field: field.to_string(),
                        charset: self.name(),
                    })
                })
                .collect(),
        }
    }

    fn decode(self, field: &str, bytes: Vec<u8>) -> Result<String, TranscodeError> {
        match self {
            Charset::Utf8 => String::from_utf8(bytes).map_err(|_| TranscodeError::Undecodable {
                field: field.to_string(),
                charset: self.name(),
            }),
            Charset::Iso8859_1 => Ok(bytes.into_iter().map(char::from).collect()),
        }
    }
}

impl FromStr for Charset {
    type Err = TranscodeError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_uppercase().as_str() {
            "UTF-8" | "UTF8" => Ok(Charset::Utf8),
            "ISO-8859-1" | "ISO8859-1" | "LATIN1" => Ok(Charset::Iso8859_1),
            _ => Err(TranscodeError::UnknownCharset(name.to_string())),
        }
    }
}

/// Transcode one value. Exposed for callers that carry values outside a
/// field set (fixtures, debugging tools).
pub fn transcode_value(
    field: &str,
    value: &str,
    direction: Direction,
    charset: Charset,
) -> Result<String, TranscodeError> {
    match direction {
        Direction::ToTransport => {
            let bytes = charset.encode(field, value)?;
            Ok(BASE64.encode(bytes))
        }
        Direction::FromTransport => {
            let bytes = BASE64
                .decode(value.as_bytes())
                .map_err(|e| TranscodeError::InvalidBase64 {
                    field: field.to_string(),
                    reason: e.to_string(),
                })?;
            charset.decode(field, bytes)
        }
    }
}

fn transcode_fields(
    fields: Vec<(&'static str, &mut Option<String>)>,
    direction: Direction,
    charset: Charset,
) -> Result<(), TranscodeError> {
    for (field, slot) in fields {
        if let Some(value) = slot.as_deref() {
            *slot = Some(transcode_value(field, value, direction, charset)?);
        }
    }
    Ok(())
}

fn transcode_map(
    map: &mut HashMap<String, String>,
    direction: Direction,
    charset: Charset,
) -> Result<(), TranscodeError> {
    for (key, value) in map.iter_mut() {
        *value = transcode_value(key, value, direction, charset)?;
    }
    Ok(())
}

/// Transcode every populated request field and supplementary value.
pub fn transcode_request(
    request: &mut HppRequest,
    direction: Direction,
    charset: Charset,
) -> Result<(), TranscodeError> {
    transcode_fields(request.fields_mut(), direction, charset)?;
    transcode_map(&mut request.supplementary_data, direction, charset)
}

/// Transcode every populated response field, TSS score and supplementary
/// value.
pub fn transcode_response(
    response: &mut HppResponse,
    direction: Direction,
    charset: Charset,
) -> Result<(), TranscodeError> {
    transcode_fields(response.fields_mut(), direction, charset)?;
    if let Some(tss) = response.tss.as_mut() {
        transcode_map(tss, direction, charset)?;
    }
    transcode_map(&mut response.supplementary_data, direction, charset)
}
