//! Canonical hash-string assembly
//!
//! Builds the delimiter-joined string of field values the two-stage digest
//! runs over. Field order and the conditional-inclusion rules are fixed by
//! the remote protocol; getting either wrong produces signatures that fail
//! bank-side verification on every transaction.
//!
//! Assembly always reads plain values — signing must happen before the
//! transport transcoding on the way out, and after it has been reversed on
//! the way in. The signature field itself never participates in the string.

use crate::hash::{generate_hash, verify_hash};
use hpp_core::types::{effective, Flag, HppRequest, HppResponse};

/// Replace the payer reference with the stored-card selector when the
/// selector is set.
///
/// The substitution mutates the field set, so the overridden value is used
/// both for hashing and for transmission. It runs exactly once, before the
/// hash string is assembled.
pub fn apply_stored_card_override(request: &mut HppRequest) {
    if !effective(&request.select_stored_card).is_empty() {
        request.payer_reference = request.select_stored_card.clone();
    }
}

/// Assemble the request canonical string.
///
/// Base segments, joined with `.`: timestamp, merchant id, order id,
/// amount. Then, each only if non-empty: debit, credit and commercial
/// amounts. Then currency. Payer and payment references follow when card
/// storage is enabled or a stored-card selector was supplied, and the fraud
/// filter mode and CVN-display overrides are appended when non-empty.
///
/// Absent fields read as empty segments; they never fail assembly (OTB and
/// validate-only flows legitimately leave fields unset).
pub fn request_hash_source(request: &HppRequest) -> String {
    let mut segments: Vec<&str> = vec![
        effective(&request.timestamp),
        effective(&request.merchant_id),
        effective(&request.order_id),
        effective(&request.amount),
    ];

    for amount in [
        &request.amount_debit,
        &request.amount_credit,
        &request.amount_commercial,
    ] {
        if !effective(amount).is_empty() {
            segments.push(effective(amount));
        }
    }

    segments.push(effective(&request.currency));

    let vault_transaction = effective(&request.card_storage_enable) == Flag::True.as_str()
        || !effective(&request.select_stored_card).is_empty();
    if vault_transaction {
        segments.push(effective(&request.payer_reference));
        segments.push(effective(&request.payment_reference));
    }

    if !effective(&request.fraud_filter_mode).is_empty() {
        segments.push(effective(&request.fraud_filter_mode));
    }

    if !effective(&request.display_cvn).is_empty() {
        segments.push(effective(&request.display_cvn));
    }

    segments.join(".")
}

/// Assemble the response canonical string.
///
/// Order: timestamp, merchant id, order id, result, message, transaction
/// reference, auth code. The saved payer and payment references are
/// appended only when both are non-empty.
pub fn response_hash_source(response: &HppResponse) -> String {
    let mut segments: Vec<&str> = vec![
        effective(&response.timestamp),
        effective(&response.merchant_id),
        effective(&response.order_id),
        effective(&response.result),
        effective(&response.message),
        effective(&response.pas_ref),
        effective(&response.auth_code),
    ];

    let payer = effective(&response.payer_reference);
    let payment = effective(&response.payment_reference);
    if !payer.is_empty() && !payment.is_empty() {
        segments.push(payer);
        segments.push(payment);
    }

    segments.join(".")
}

/// Sign an outbound request: apply the stored-card override, assemble the
/// canonical string from plain values, and store the two-stage digest in
/// the signature field.
///
/// Identity fields must be finalized first (see
/// [`hpp_core::generate_defaults`]); mutating a canonical field afterwards
/// invalidates the signature.
pub fn sign_request(request: &mut HppRequest, secret: &str) {
    apply_stored_card_override(request);
    request.hash = Some(generate_hash(&request_hash_source(request), secret));
}

/// Sign a response field set. The remote service does this; it exists here
/// for building test doubles and fixtures.
pub fn sign_response(response: &mut HppResponse, secret: &str) {
    response.hash = Some(generate_hash(&response_hash_source(response), secret));
}

/// Verify an inbound response signature against plain (decoded) values.
///
/// Returns `false` on any mismatch, including a missing or empty signature
/// field. A `false` result is a trust-boundary failure: the response must
/// be rejected, never partially honored.
pub fn verify_response(response: &HppResponse, secret: &str) -> bool {
    let received = effective(&response.hash);
    if received.is_empty() {
        return false;
    }
    verify_hash(&response_hash_source(response), secret, received)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn base_request() -> HppRequest {
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
    fn test_base_hash_source() {
        assert_eq!(
            request_hash_source(&base_request()),
            "20130814122239.thestore.ORD453-11.29900.EUR"
        );
    }

    #[test]
    fn test_absent_fields_read_as_empty_segments() {
        let request = HppRequest::default();
        assert_eq!(request_hash_source(&request), "....");
    }

    #[test]
    fn test_card_type_amounts_appended_in_order() {
        let request = HppRequest {
            amount_debit: Some("100".to_string()),
            amount_credit: Some("200".to_string()),
            amount_commercial: Some("300".to_string()),
            ..base_request()
        };
        assert_eq!(
            request_hash_source(&request),
            "20130814122239.thestore.ORD453-11.29900.100.200.300.EUR"
        );
    }

    #[test]
    fn test_card_type_amounts_skip_empty() {
        let request = HppRequest {
            amount_debit: Some(String::new()),
            amount_credit: Some("200".to_string()),
            ..base_request()
        };
        assert_eq!(
            request_hash_source(&request),
            "20130814122239.thestore.ORD453-11.29900.200.EUR"
        );
    }

    #[test]
    fn test_card_storage_appends_references() {
        let request = HppRequest {
            card_storage_enable: Some("1".to_string()),
            payer_reference: Some("payerref".to_string()),
            payment_reference: Some("pmtref".to_string()),
            ..base_request()
        };
        assert_eq!(
            request_hash_source(&request),
            "20130814122239.thestore.ORD453-11.29900.EUR.payerref.pmtref"
        );
    }

    #[test]
    fn test_storage_disabled_excludes_references() {
        // References populated but storage off: they stay out of the hash.
        let request = HppRequest {
            card_storage_enable: Some("0".to_string()),
            payer_reference: Some("payerref".to_string()),
            payment_reference: Some("pmtref".to_string()),
            ..base_request()
        };
        assert_eq!(
            request_hash_source(&request),
            "20130814122239.thestore.ORD453-11.29900.EUR"
        );
    }

    #[test]
    fn test_fraud_filter_mode_appended() {
        let request = HppRequest {
            fraud_filter_mode: Some("ACTIVE".to_string()),
            ..base_request()
        };
        assert_eq!(
            request_hash_source(&request),
            "20130814122239.thestore.ORD453-11.29900.EUR.ACTIVE"
        );
    }

    #[test]
    fn test_display_cvn_appended_last() {
        let request = HppRequest {
            card_storage_enable: Some("1".to_string()),
            payer_reference: Some("payerref".to_string()),
            payment_reference: Some("pmtref".to_string()),
            fraud_filter_mode: Some("ACTIVE".to_string()),
            display_cvn: Some("TRUE".to_string()),
            ..base_request()
        };
        assert_eq!(
            request_hash_source(&request),
            "20130814122239.thestore.ORD453-11.29900.EUR.payerref.pmtref.ACTIVE.TRUE"
        );
    }

    #[test]
    fn test_stored_card_selector_overrides_payer_reference() {
        let mut request = HppRequest {
            select_stored_card: Some("stored-card-ref".to_string()),
            payer_reference: Some("original-payer".to_string()),
            payment_reference: Some("pmtref".to_string()),
            ..base_request()
        };
        sign_request(&mut request, "mysecret");

        // The transmitted payer reference equals the selector value.
        assert_eq!(request.payer_reference.as_deref(), Some("stored-card-ref"));
        assert_eq!(
            request.hash.as_deref(),
            Some("48b47e06763da771a7b7bf4f822a8dea62d10201")
        );
    }

    #[test]
    fn test_selector_empty_leaves_payer_reference() {
        let mut request = HppRequest {
            select_stored_card: Some(String::new()),
            payer_reference: Some("original-payer".to_string()),
            ..base_request()
        };
        apply_stored_card_override(&mut request);
        assert_eq!(request.payer_reference.as_deref(), Some("original-payer"));
    }

    #[test]
    fn test_sign_request_known_vector() {
        let mut request = base_request();
        sign_request(&mut request, "mysecret");
        assert_eq!(
            request.hash.as_deref(),
            Some("cc72c08e529b3bc153481eda9533b815cef29de3")
        );
    }

    #[test]
    fn test_signature_depends_on_values_not_population_order() {
        // Same values assembled from differently-built field sets.
        let mut first = base_request();
        let mut second = HppRequest {
            currency: Some("EUR".to_string()),
            amount: Some("29900".to_string()),
            timestamp: Some("20130814122239".to_string()),
            order_id: Some("ORD453-11".to_string()),
            merchant_id: Some("thestore".to_string()),
            ..Default::default()
        };

        sign_request(&mut first, "mysecret");
        sign_request(&mut second, "mysecret");
        assert_eq!(first.hash, second.hash);
    }

    #[test]
    fn test_signature_sensitive_to_each_canonical_field() {
        let mut reference = base_request();
        sign_request(&mut reference, "mysecret");

        let mutations: Vec<fn(&mut HppRequest)> = vec![
            |r| r.timestamp = Some("20130814122240".to_string()),
            |r| r.merchant_id = Some("otherstore".to_string()),
            |r| r.order_id = Some("ORD453-12".to_string()),
            |r| r.amount = Some("29901".to_string()),
            |r| r.currency = Some("GBP".to_string()),
        ];

        for mutate in mutations {
            let mut request = base_request();
            mutate(&mut request);
            sign_request(&mut request, "mysecret");
            assert_ne!(request.hash, reference.hash);
        }
    }

    #[test]
    fn test_hash_field_not_part_of_its_own_digest() {
        let mut request = base_request();
        request.hash = Some("stale-signature".to_string());
        sign_request(&mut request, "mysecret");
        assert_eq!(
            request.hash.as_deref(),
            Some("cc72c08e529b3bc153481eda9533b815cef29de3")
        );
    }

    fn base_response() -> HppResponse {
        HppResponse {
            merchant_id: Some("thestore".to_string()),
            order_id: Some("ORD453-11".to_string()),
            timestamp: Some("20130814122239".to_string()),
            result: Some("00".to_string()),
            message: Some("Successful".to_string()),
            pas_ref: Some("3737468273643".to_string()),
            auth_code: Some("79347".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_response_hash_source() {
        assert_eq!(
            response_hash_source(&base_response()),
            "20130814122239.thestore.ORD453-11.00.Successful.3737468273643.79347"
        );
    }

    #[test]
    fn test_response_references_require_both() {
        let mut response = base_response();
        response.payer_reference = Some("payerref".to_string());
        assert_eq!(
            response_hash_source(&response),
            "20130814122239.thestore.ORD453-11.00.Successful.3737468273643.79347"
        );

        response.payment_reference = Some("pmtref".to_string());
        assert_eq!(
            response_hash_source(&response),
            "20130814122239.thestore.ORD453-11.00.Successful.3737468273643.79347.payerref.pmtref"
        );
    }

    #[test]
    fn test_verify_response_round_trip() {
        let mut response = base_response();
        sign_response(&mut response, "mysecret");
        assert_eq!(
            response.hash.as_deref(),
            Some("f093a0b233daa15f2bf44888f4fe75cb652e7bf0")
        );
        assert!(verify_response(&response, "mysecret"));
    }

    #[test]
    fn test_verify_response_rejects_tampering() {
        let mut response = base_response();
        sign_response(&mut response, "mysecret");

        response.amount = Some("1".to_string()); // not hashed; still fine
        assert!(verify_response(&response, "mysecret"));

        response.auth_code = Some("79348".to_string());
        assert!(!verify_response(&response, "mysecret"));
    }

    #[test]
    fn test_verify_response_rejects_wrong_secret() {
        let mut response = base_response();
        sign_response(&mut response, "mysecret");
        assert!(!verify_response(&response, "othersecret"));
    }

    #[test]
    fn test_verify_response_missing_signature() {
        assert!(!verify_response(&base_response(), "mysecret"));

        let mut response = base_response();
        response.hash = Some(String::new());
        assert!(!verify_response(&response, "mysecret"));
    }

    #[test]
    fn test_verify_response_case_insensitive() {
        let mut response = base_response();
        sign_response(&mut response, "mysecret");
        response.hash = response.hash.map(|h| h.to_uppercase());
        assert!(verify_response(&response, "mysecret"));
    }
}
