//! HPP field validation
//!
//! Syntactic validation of request fields against the remote service's
//! per-field rules: a maximum length and an allowed-character set, expressed
//! as one data-driven table checked before signing and encoding. Rules run
//! against plain (untranscoded) values; the signing core never re-validates.
//!
//! Absent fields always pass. The remote service decides which fields are
//! required for a given transaction type, so requiredness is not enforced
//! here; only present values are checked for shape.

use crate::types::{wire, HppRequest};
use thiserror::Error;

/// Errors produced by the pre-send validation gate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is shorter than the minimum of {min} characters")]
    TooShort { field: &'static str, min: usize },

    #[error("{field} exceeds the maximum of {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} contains characters outside its allowed set")]
    InvalidCharacters { field: &'static str },

    #[error("Invalid field value: {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}

/// One syntactic rule: length bounds plus a character-class predicate.
struct FieldRule {
    field: &'static str,
    get: fn(&HppRequest) -> &Option<String>,
    min: usize,
    max: usize,
    allowed: fn(char) -> bool,
}

static RULES: &[FieldRule] = &[
    FieldRule {
        field: wire::MERCHANT_ID,
        get: |r| &r.merchant_id,
        min: 1,
        max: 50,
        allowed: |c| c.is_ascii_alphanumeric() || c == '.',
    },
    FieldRule {
        field: wire::ACCOUNT,
        get: |r| &r.account,
        min: 0,
        max: 30,
        allowed: |c| c.is_ascii_alphanumeric() || c.is_whitespace(),
    },
    FieldRule {
        field: wire::ORDER_ID,
        get: |r| &r.order_id,
        min: 0,
        max: 50,
        allowed: |c| c.is_ascii_alphanumeric() || c == '_' || c == '-',
    },
    FieldRule {
        field: wire::AMOUNT,
        get: |r| &r.amount,
        min: 1,
        max: 11,
        allowed: |c| c.is_ascii_digit(),
    },
    FieldRule {
        field: wire::CURRENCY,
        get: |r| &r.currency,
        min: 3,
        max: 3,
        allowed: |c| c.is_ascii_alphabetic(),
    },
    FieldRule {
        field: wire::TIMESTAMP,
        get: |r| &r.timestamp,
        min: 14,
        max: 14,
        allowed: |c| c.is_ascii_digit(),
    },
    FieldRule {
        field: wire::SHA1HASH,
        get: |r| &r.hash,
        min: 40,
        max: 40,
        allowed: |c| matches!(c, '0'..='9' | 'a'..='f'),
    },
    FieldRule {
        field: wire::COMMENT1,
        get: |r| &r.comment_one,
        min: 0,
        max: 255,
        allowed: is_comment_char,
    },
    FieldRule {
        field: wire::COMMENT2,
        get: |r| &r.comment_two,
        min: 0,
        max: 255,
        allowed: is_comment_char,
    },
    FieldRule {
        field: wire::RETURN_TSS,
        get: |r| &r.return_tss,
        min: 0,
        max: 1,
        allowed: |c| c == '0' || c == '1',
    },
    FieldRule {
        field: wire::SHIPPING_CODE,
        get: |r| &r.shipping_code,
        min: 0,
        max: 30,
        allowed: |c| c.is_ascii_alphanumeric() || ",.-/| ".contains(c),
    },
    FieldRule {
        field: wire::SHIPPING_CO,
        get: |r| &r.shipping_country,
        min: 0,
        max: 50,
        allowed: |c| c.is_ascii_alphanumeric() || ",.- ".contains(c),
    },
    FieldRule {
        field: wire::BILLING_CODE,
        get: |r| &r.billing_code,
        min: 0,
        max: 60,
        allowed: |c| c.is_ascii_alphanumeric() || ",.-/|* ".contains(c),
    },
    FieldRule {
        field: wire::BILLING_CO,
        get: |r| &r.billing_country,
        min: 0,
        max: 50,
        allowed: |c| c.is_ascii_alphanumeric() || ",.- ".contains(c),
    },
    FieldRule {
        field: wire::CUST_NUM,
        get: |r| &r.customer_number,
        min: 0,
        max: 50,
        allowed: is_reference_char,
    },
    FieldRule {
        field: wire::VAR_REF,
        get: |r| &r.variable_reference,
        min: 0,
        max: 50,
        allowed: is_reference_char,
    },
    FieldRule {
        field: wire::PROD_ID,
        get: |r| &r.product_id,
        min: 0,
        max: 50,
        allowed: is_reference_char,
    },
    FieldRule {
        field: wire::CARD_PAYMENT_BUTTON,
        get: |r| &r.card_payment_button_text,
        min: 0,
        max: 25,
        allowed: is_button_text_char,
    },
    FieldRule {
        field: wire::CARD_STORAGE_ENABLE,
        get: |r| &r.card_storage_enable,
        min: 0,
        max: 1,
        allowed: |c| c == '0' || c == '1',
    },
    FieldRule {
        field: wire::OFFER_SAVE_CARD,
        get: |r| &r.offer_save_card,
        min: 0,
        max: 1,
        allowed: |c| c == '0' || c == '1',
    },
    FieldRule {
        field: wire::PAYER_REF,
        get: |r| &r.payer_reference,
        min: 0,
        max: 50,
        allowed: |c| c.is_ascii_alphanumeric() || "_-\\ ".contains(c),
    },
    FieldRule {
        field: wire::PMT_REF,
        get: |r| &r.payment_reference,
        min: 0,
        max: 50,
        allowed: |c| c.is_ascii_alphanumeric() || c == '_' || c == '-',
    },
    FieldRule {
        field: wire::PAYER_EXIST,
        get: |r| &r.payer_exists,
        min: 0,
        max: 1,
        allowed: |c| matches!(c, '0' | '1' | '2'),
    },
    FieldRule {
        field: wire::VALIDATE_CARD_ONLY,
        get: |r| &r.validate_card_only,
        min: 0,
        max: 1,
        allowed: |c| c == '0' || c == '1',
    },
    FieldRule {
        field: wire::DCC_ENABLE,
        get: |r| &r.dcc_enable,
        min: 0,
        max: 1,
        allowed: |c| c == '0' || c == '1',
    },
    FieldRule {
        field: wire::HPP_VERSION,
        get: |r| &r.hpp_version,
        min: 0,
        max: 1,
        allowed: |c| c == '1' || c == '2',
    },
    FieldRule {
        field: wire::HPP_SELECT_STORED_CARD,
        get: |r| &r.select_stored_card,
        min: 0,
        max: 50,
        allowed: |c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.' || c.is_whitespace(),
    },
    FieldRule {
        field: wire::HPP_AMOUNT_DEBIT,
        get: |r| &r.amount_debit,
        min: 0,
        max: 11,
        allowed: |c| c.is_ascii_digit(),
    },
    FieldRule {
        field: wire::HPP_AMOUNT_CREDIT,
        get: |r| &r.amount_credit,
        min: 0,
        max: 11,
        allowed: |c| c.is_ascii_digit(),
    },
    FieldRule {
        field: wire::HPP_AMOUNT_COMMERCIAL,
        get: |r| &r.amount_commercial,
        min: 0,
        max: 11,
        allowed: |c| c.is_ascii_digit(),
    },
];

/// Validate every present request field against the rule table, then the
/// structural rules that don't fit a length/character-class shape.
///
/// Absent fields pass. Values must be plain, not yet transcoded for
/// transport.
pub fn validate_request(request: &HppRequest) -> Result<(), ValidationError> {
    for rule in RULES {
        if let Some(value) = (rule.get)(request) {
            check_rule(rule, value)?;
        }
    }

    validate_auto_settle_flag(request)?;
    validate_language(request)?;
    validate_fraud_filter_mode(request)?;
    validate_display_cvn(request)?;

    Ok(())
}

fn check_rule(rule: &FieldRule, value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();

    if len < rule.min {
        return Err(ValidationError::TooShort {
            field: rule.field,
            min: rule.min,
        });
    }
    if len > rule.max {
        return Err(ValidationError::TooLong {
            field: rule.field,
            max: rule.max,
        });
    }
    if !value.chars().all(rule.allowed) {
        return Err(ValidationError::InvalidCharacters { field: rule.field });
    }

    Ok(())
}

/// The accepted auto-settle values. The upstream protocol documentation is
/// ambiguous here; this is the confirmed set.
fn validate_auto_settle_flag(request: &HppRequest) -> Result<(), ValidationError> {
    match request.auto_settle_flag.as_deref() {
        None | Some("") => Ok(()),
        Some(value) => {
            let lower = value.to_ascii_lowercase();
            if matches!(lower.as_str(), "0" | "1" | "on" | "off" | "multi") {
                Ok(())
            } else {
                Err(ValidationError::InvalidValue {
                    field: wire::AUTO_SETTLE_FLAG,
                    reason: "must be one of 0, 1, on, off or multi",
                })
            }
        }
    }
}

/// Language tags are `xx` or `xx_YY`, two ASCII letters each.
fn validate_language(request: &HppRequest) -> Result<(), ValidationError> {
    let value = match request.language.as_deref() {
        None | Some("") => return Ok(()),
        Some(value) => value,
    };

    let parts: Vec<&str> = value.split('_').collect();
    let part_ok = |p: &str| p.len() == 2 && p.chars().all(|c| c.is_ascii_alphabetic());
    let valid = match parts.as_slice() {
        [lang] => part_ok(lang),
        [lang, region] => part_ok(lang) && part_ok(region),
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: wire::HPP_LANG,
            reason: "must be a two-letter language tag with an optional _XX region",
        })
    }
}

fn validate_fraud_filter_mode(request: &HppRequest) -> Result<(), ValidationError> {
    match request.fraud_filter_mode.as_deref() {
        None | Some("") | Some("ACTIVE") | Some("PASSIVE") | Some("OFF") => Ok(()),
        Some(_) => Err(ValidationError::InvalidValue {
            field: wire::HPP_FRAUDFILTER_MODE,
            reason: "must be ACTIVE, PASSIVE or OFF",
        }),
    }
}

fn validate_display_cvn(request: &HppRequest) -> Result<(), ValidationError> {
    match request.display_cvn.as_deref() {
        None | Some("") | Some("TRUE") | Some("FALSE") | Some("true") | Some("false") => Ok(()),
        Some(_) => Err(ValidationError::InvalidValue {
            field: wire::HPP_DISPLAY_CVN,
            reason: "must be TRUE or FALSE",
        }),
    }
}

/// Characters accepted in the freeform comment fields: whitespace, most of
/// printable ASCII (minus `<` and `>`), printable Latin-1, and the
/// Windows-1252 supplement.
fn is_comment_char(c: char) -> bool {
    c.is_whitespace()
        || matches!(c, '\u{20}'..='\u{3B}' | '=' | '\u{3F}'..='\u{7E}' | '\u{A1}'..='\u{FF}')
        || is_cp1252_supplement(c)
}

/// Customer number, variable reference and product id share one set.
fn is_reference_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "._-,+@ ".contains(c) || c.is_whitespace()
}

/// Payment-button text: alphanumerics, Latin-1 letters and a fixed set of
/// punctuation and currency symbols.
fn is_button_text_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, '\u{C0}'..='\u{FF}' | '¤' | '¥' | '£')
        || is_cp1252_supplement(c)
        || "'\",+._-&/@!?%()*:$€#[]|=\\“” ".contains(c)
}

/// The printable characters Windows-1252 adds on top of Latin-1.
fn is_cp1252_supplement(c: char) -> bool {
    matches!(
        c,
        '€' | '‚'
            | 'ƒ'
            | '„'
            | '…'
            | '†'
            | '‡'
            | 'ˆ'
            | '‰'
            | 'Š'
            | '‹'
            | 'Œ'
            | 'Ž'
            | '‘'
            | '’'
            | '“'
            | '”'
            | '•'
            | '–'
            | '—'
            | '˜'
            | '™'
            | 'š'
            | '›'
            | 'œ'
            | 'ž'
            | 'Ÿ'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> HppRequest {
        HppRequest {
            merchant_id: Some("thestore".to_string()),
            account: Some("internet".to_string()),
            order_id: Some("ORD453-11".to_string()),
            amount: Some("29900".to_string()),
            currency: Some("EUR".to_string()),
            timestamp: Some("20130814122239".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(validate_request(&valid_request()).is_ok());
    }

    #[test]
    fn test_empty_request_passes() {
        // Requiredness is the remote service's concern.
        assert!(validate_request(&HppRequest::default()).is_ok());
    }

    #[test]
    fn test_merchant_id_empty_rejected() {
        let mut request = valid_request();
        request.merchant_id = Some(String::new());
        assert!(matches!(
            validate_request(&request),
            Err(ValidationError::TooShort {
                field: wire::MERCHANT_ID,
                ..
            })
        ));
    }

    #[test]
    fn test_merchant_id_bad_characters() {
        let mut request = valid_request();
        request.merchant_id = Some("the store!".to_string());
        assert!(matches!(
            validate_request(&request),
            Err(ValidationError::InvalidCharacters {
                field: wire::MERCHANT_ID
            })
        ));
    }

    #[test]
    fn test_amount_must_be_digits() {
        let mut request = valid_request();
        request.amount = Some("299.00".to_string());
        assert!(matches!(
            validate_request(&request),
            Err(ValidationError::InvalidCharacters {
                field: wire::AMOUNT
            })
        ));
    }

    #[test]
    fn test_amount_too_long() {
        let mut request = valid_request();
        request.amount = Some("1".repeat(12));
        assert!(matches!(
            validate_request(&request),
            Err(ValidationError::TooLong {
                field: wire::AMOUNT,
                max: 11
            })
        ));
    }

    #[test]
    fn test_currency_exact_length() {
        let mut request = valid_request();
        request.currency = Some("EURO".to_string());
        assert!(matches!(
            validate_request(&request),
            Err(ValidationError::TooLong {
                field: wire::CURRENCY,
                ..
            })
        ));

        request.currency = Some("EU".to_string());
        assert!(matches!(
            validate_request(&request),
            Err(ValidationError::TooShort {
                field: wire::CURRENCY,
                ..
            })
        ));
    }

    #[test]
    fn test_timestamp_shape() {
        let mut request = valid_request();
        request.timestamp = Some("2013-08-14".to_string());
        assert!(validate_request(&request).is_err());

        request.timestamp = Some("20130814122239".to_string());
        assert!(validate_request(&request).is_ok());
    }

    #[test]
    fn test_hash_must_be_lowercase_hex() {
        let mut request = valid_request();
        request.hash = Some("CC72C08E529B3BC153481EDA9533B815CEF29DE3".to_string());
        assert!(matches!(
            validate_request(&request),
            Err(ValidationError::InvalidCharacters {
                field: wire::SHA1HASH
            })
        ));

        request.hash = Some("cc72c08e529b3bc153481eda9533b815cef29de3".to_string());
        assert!(validate_request(&request).is_ok());
    }

    #[test]
    fn test_auto_settle_flag_values() {
        let mut request = valid_request();
        for value in ["0", "1", "on", "off", "multi", "ON", "Off", "MULTI", ""] {
            request.auto_settle_flag = Some(value.to_string());
            assert!(validate_request(&request).is_ok(), "rejected {value:?}");
        }

        request.auto_settle_flag = Some("sometimes".to_string());
        assert!(matches!(
            validate_request(&request),
            Err(ValidationError::InvalidValue {
                field: wire::AUTO_SETTLE_FLAG,
                ..
            })
        ));
    }

    #[test]
    fn test_language_tags() {
        let mut request = valid_request();
        for value in ["en", "de", "en_GB", "pt_BR"] {
            request.language = Some(value.to_string());
            assert!(validate_request(&request).is_ok(), "rejected {value:?}");
        }
        for value in ["e", "eng", "en-GB", "en_GBR", "en_"] {
            request.language = Some(value.to_string());
            assert!(validate_request(&request).is_err(), "accepted {value:?}");
        }
    }

    #[test]
    fn test_fraud_filter_mode_values() {
        let mut request = valid_request();
        for value in ["ACTIVE", "PASSIVE", "OFF", ""] {
            request.fraud_filter_mode = Some(value.to_string());
            assert!(validate_request(&request).is_ok(), "rejected {value:?}");
        }
        request.fraud_filter_mode = Some("active".to_string());
        assert!(validate_request(&request).is_err());
    }

    #[test]
    fn test_display_cvn_values() {
        let mut request = valid_request();
        for value in ["TRUE", "FALSE", "true", "false", ""] {
            request.display_cvn = Some(value.to_string());
            assert!(validate_request(&request).is_ok(), "rejected {value:?}");
        }
        request.display_cvn = Some("True".to_string());
        assert!(validate_request(&request).is_err());
    }

    #[test]
    fn test_comment_accepts_latin1_and_cp1252() {
        let mut request = valid_request();
        request.comment_one = Some("Dankeschön – 20€ Rabatt".to_string());
        assert!(validate_request(&request).is_ok());

        request.comment_one = Some("日本語".to_string());
        assert!(matches!(
            validate_request(&request),
            Err(ValidationError::InvalidCharacters {
                field: wire::COMMENT1
            })
        ));
    }

    #[test]
    fn test_comment_length_limit() {
        let mut request = valid_request();
        request.comment_one = Some("a".repeat(255));
        assert!(validate_request(&request).is_ok());

        request.comment_one = Some("a".repeat(256));
        assert!(matches!(
            validate_request(&request),
            Err(ValidationError::TooLong {
                field: wire::COMMENT1,
                max: 255
            })
        ));
    }

    #[test]
    fn test_payer_reference_allows_backslash_and_space() {
        let mut request = valid_request();
        request.payer_reference = Some("domain\\user name".to_string());
        assert!(validate_request(&request).is_ok());
    }

    #[test]
    fn test_payment_reference_rejects_space() {
        let mut request = valid_request();
        request.payment_reference = Some("card one".to_string());
        assert!(matches!(
            validate_request(&request),
            Err(ValidationError::InvalidCharacters {
                field: wire::PMT_REF
            })
        ));
    }

    #[test]
    fn test_button_text() {
        let mut request = valid_request();
        request.card_payment_button_text = Some("Jetzt zahlen: 20€!".to_string());
        assert!(validate_request(&request).is_ok());

        request.card_payment_button_text = Some("Pay<script>".to_string());
        assert!(matches!(
            validate_request(&request),
            Err(ValidationError::InvalidCharacters {
                field: wire::CARD_PAYMENT_BUTTON
            })
        ));
    }

    #[test]
    fn test_flag_fields_single_digit() {
        let mut request = valid_request();
        request.payer_exists = Some("2".to_string());
        assert!(validate_request(&request).is_ok());

        request.payer_exists = Some("3".to_string());
        assert!(validate_request(&request).is_err());

        request.payer_exists = None;
        request.hpp_version = Some("2".to_string());
        assert!(validate_request(&request).is_ok());

        request.hpp_version = Some("3".to_string());
        assert!(validate_request(&request).is_err());
    }
}
