//! JSON codec for the transport boundary
//!
//! Sequencing is the whole contract here: outbound payloads are validated,
//! defaulted and signed on plain values, then transcoded, then serialized;
//! inbound payloads are deserialized, transcoded back to plain values, then
//! verified. Signing never sees transport-encoded values.

use crate::error::HppHttpError;
use hpp_canonical::{
    sign_request, sign_response, transcode_request, transcode_response, verify_response, Charset,
    Direction,
};
use hpp_core::{generate_defaults, validate_request, HppRequest, HppResponse};

/// Prepare an outbound request and serialize it for transport.
///
/// Runs the full outbound pipeline: validate → generate defaults → sign →
/// encode → serialize. The request is left in its transport-encoded state.
pub fn request_to_json(
    request: &mut HppRequest,
    secret: &str,
    charset: Charset,
) -> Result<String, HppHttpError> {
    validate_request(request)?;
    generate_defaults(request);
    sign_request(request, secret);
    transcode_request(request, Direction::ToTransport, charset)?;
    Ok(serde_json::to_string(request)?)
}

/// Deserialize a transport request JSON back to plain values.
pub fn request_from_json(json: &str, charset: Charset) -> Result<HppRequest, HppHttpError> {
    let mut request: HppRequest =
        serde_json::from_str(json).map_err(|e| HppHttpError::ParseError(e.to_string()))?;
    transcode_request(&mut request, Direction::FromTransport, charset)?;
    Ok(request)
}

/// Sign and serialize a response the way the remote service does. Exists
/// for test doubles of the payment page.
pub fn response_to_json(
    response: &mut HppResponse,
    secret: &str,
    charset: Charset,
) -> Result<String, HppHttpError> {
    sign_response(response, secret);
    transcode_response(response, Direction::ToTransport, charset)?;
    Ok(serde_json::to_string(response)?)
}

/// Decode an inbound response to plain values and verify its signature.
///
/// A mismatch is [`HppHttpError::SignatureMismatch`]; the caller must treat
/// it as "do not honor this response".
pub fn decode_and_verify_response(
    response: &mut HppResponse,
    secret: &str,
    charset: Charset,
) -> Result<(), HppHttpError> {
    transcode_response(response, Direction::FromTransport, charset)?;
    if verify_response(response, secret) {
        Ok(())
    } else {
        Err(HppHttpError::SignatureMismatch)
    }
}

/// Deserialize, decode and verify an inbound response JSON.
pub fn response_from_json(
    json: &str,
    secret: &str,
    charset: Charset,
) -> Result<HppResponse, HppHttpError> {
    let mut response: HppResponse =
        serde_json::from_str(json).map_err(|e| HppHttpError::ParseError(e.to_string()))?;
    decode_and_verify_response(&mut response, secret, charset)?;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outbound_request() -> HppRequest {
        HppRequest {
            merchant_id: Some("thestore".to_string()),
            order_id: Some("ORD453-11".to_string()),
            amount: Some("29900".to_string()),
            currency: Some("EUR".to_string()),
            timestamp: Some("20130814122239".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_request_to_json_round_trip() {
        let mut request = outbound_request();
        let json = request_to_json(&mut request, "mysecret", Charset::Utf8).unwrap();

        // Wire values are encoded.
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["CURRENCY"], "RVVS");

        // Decoding recovers the plain signed request.
        let decoded = request_from_json(&json, Charset::Utf8).unwrap();
        assert_eq!(decoded.currency.as_deref(), Some("EUR"));
        assert_eq!(
            decoded.hash.as_deref(),
            Some("cc72c08e529b3bc153481eda9533b815cef29de3")
        );
    }

    #[test]
    fn test_request_to_json_defaults_missing_identity_fields() {
        let mut request = HppRequest {
            merchant_id: Some("thestore".to_string()),
            amount: Some("29900".to_string()),
            currency: Some("EUR".to_string()),
            ..Default::default()
        };
        let json = request_to_json(&mut request, "mysecret", Charset::Utf8).unwrap();

        let decoded = request_from_json(&json, Charset::Utf8).unwrap();
        assert_eq!(decoded.timestamp.as_deref().map(str::len), Some(14));
        assert_eq!(decoded.order_id.as_deref().map(str::len), Some(22));
    }

    #[test]
    fn test_request_to_json_rejects_invalid_fields() {
        let mut request = outbound_request();
        request.amount = Some("29,900".to_string());

        assert!(matches!(
            request_to_json(&mut request, "mysecret", Charset::Utf8),
            Err(HppHttpError::Validation(_))
        ));
    }

    #[test]
    fn test_response_json_verify_round_trip() {
        let mut response = HppResponse {
            merchant_id: Some("thestore".to_string()),
            order_id: Some("ORD453-11".to_string()),
            timestamp: Some("20130814122239".to_string()),
            result: Some("00".to_string()),
            message: Some("Successful".to_string()),
            pas_ref: Some("3737468273643".to_string()),
            auth_code: Some("79347".to_string()),
            ..Default::default()
        };
        let json = response_to_json(&mut response, "mysecret", Charset::Utf8).unwrap();

        let verified = response_from_json(&json, "mysecret", Charset::Utf8).unwrap();
        assert_eq!(verified.result.as_deref(), Some("00"));
    }

    #[test]
    fn test_response_from_json_rejects_wrong_secret() {
        let mut response = HppResponse {
            result: Some("00".to_string()),
            ..Default::default()
        };
        let json = response_to_json(&mut response, "mysecret", Charset::Utf8).unwrap();

        assert!(matches!(
            response_from_json(&json, "othersecret", Charset::Utf8),
            Err(HppHttpError::SignatureMismatch)
        ));
    }

    #[test]
    fn test_response_from_json_rejects_garbage() {
        assert!(matches!(
            response_from_json("{ not json", "mysecret", Charset::Utf8),
            Err(HppHttpError::ParseError(_))
        ));
    }
}
