//! HPP Core Types
//!
//! This module contains the field-set types exchanged with the hosted
//! payment page: the outbound [`HppRequest`] and the inbound
//! [`HppResponse`], plus the fixed wire-name mapping both serialize under.
//!
//! Every canonical field is an `Option<String>`. Absence means "not set":
//! the signer treats it as an empty string, the transcoder and the JSON
//! codec skip it entirely. The open-ended supplementary map is flattened
//! into the same JSON object, so caller-defined keys travel alongside the
//! fixed key set and are split back out on deserialization.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// String values used by the boolean-ish HPP flag fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    True,
    False,
}

impl Flag {
    /// Wire representation of the flag ("1" or "0").
    pub fn as_str(self) -> &'static str {
        match self {
            Flag::True => "1",
            Flag::False => "0",
        }
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        if value {
            Flag::True
        } else {
            Flag::False
        }
    }
}

/// Fixed transport keys for the canonical fields.
///
/// These names are the serialization contract with the remote service and
/// must be preserved exactly.
pub mod wire {
    pub const MERCHANT_ID: &str = "MERCHANT_ID";
    pub const ACCOUNT: &str = "ACCOUNT";
    pub const ORDER_ID: &str = "ORDER_ID";
    pub const AMOUNT: &str = "AMOUNT";
    pub const CURRENCY: &str = "CURRENCY";
    pub const TIMESTAMP: &str = "TIMESTAMP";
    pub const SHA1HASH: &str = "SHA1HASH";
    pub const AUTO_SETTLE_FLAG: &str = "AUTO_SETTLE_FLAG";
    pub const COMMENT1: &str = "COMMENT1";
    pub const COMMENT2: &str = "COMMENT2";
    pub const RETURN_TSS: &str = "RETURN_TSS";
    pub const SHIPPING_CODE: &str = "SHIPPING_CODE";
    pub const SHIPPING_CO: &str = "SHIPPING_CO";
    pub const BILLING_CODE: &str = "BILLING_CODE";
    pub const BILLING_CO: &str = "BILLING_CO";
    pub const CUST_NUM: &str = "CUST_NUM";
    pub const VAR_REF: &str = "VAR_REF";
    pub const PROD_ID: &str = "PROD_ID";
    pub const HPP_LANG: &str = "HPP_LANG";
    pub const CARD_PAYMENT_BUTTON: &str = "CARD_PAYMENT_BUTTON";
    pub const CARD_STORAGE_ENABLE: &str = "CARD_STORAGE_ENABLE";
    pub const OFFER_SAVE_CARD: &str = "OFFER_SAVE_CARD";
    pub const PAYER_REF: &str = "PAYER_REF";
    pub const PMT_REF: &str = "PMT_REF";
    pub const PAYER_EXIST: &str = "PAYER_EXIST";
    pub const VALIDATE_CARD_ONLY: &str = "VALIDATE_CARD_ONLY";
    pub const DCC_ENABLE: &str = "DCC_ENABLE";
    pub const HPP_FRAUDFILTER_MODE: &str = "HPP_FRAUDFILTER_MODE";
    pub const HPP_VERSION: &str = "HPP_VERSION";
    pub const HPP_SELECT_STORED_CARD: &str = "HPP_SELECT_STORED_CARD";
    pub const HPP_DISPLAY_CVN: &str = "HPP_DISPLAY_CVN";
    pub const HPP_AMOUNT_DEBIT: &str = "HPP_AMOUNT_DEBIT";
    pub const HPP_AMOUNT_CREDIT: &str = "HPP_AMOUNT_CREDIT";
    pub const HPP_AMOUNT_COMMERCIAL: &str = "HPP_AMOUNT_COMMERCIAL";

    pub const AUTHCODE: &str = "AUTHCODE";
    pub const RESULT: &str = "RESULT";
    pub const MESSAGE: &str = "MESSAGE";
    pub const CVNRESULT: &str = "CVNRESULT";
    pub const PASREF: &str = "PASREF";
    pub const BATCHID: &str = "BATCHID";
    pub const ECI: &str = "ECI";
    pub const CAVV: &str = "CAVV";
    pub const XID: &str = "XID";
    pub const SAVED_PAYER_REF: &str = "SAVED_PAYER_REF";
    pub const SAVED_PMT_REF: &str = "SAVED_PMT_REF";
    pub const TSS: &str = "TSS";
}

/// Effective value of a field for hash assembly and conditional-inclusion
/// checks: an absent field reads as the empty string.
pub fn effective(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("")
}

/// Outbound request field set for one HPP exchange.
///
/// Constructed with named fields (`..Default::default()` for the rest),
/// optionally defaulted, signed exactly once per transmission attempt and
/// transcoded exactly once per direction. Instances carry no identity
/// beyond the single exchange they represent and provide no internal
/// synchronization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HppRequest {
    /// Merchant identifier issued by the payment service (not the bank
    /// merchant number).
    #[serde(rename = "MERCHANT_ID", skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,

    /// Sub-account for this transaction. The default sub-account is used
    /// when absent.
    #[serde(rename = "ACCOUNT", skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    /// Unique transaction identifier. No spaces.
    #[serde(rename = "ORDER_ID", skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    /// Amount in the lowest unit of the currency. "0" for validate-only
    /// (OTB) transactions.
    #[serde(rename = "AMOUNT", skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,

    /// Three-letter currency code.
    #[serde(rename = "CURRENCY", skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Transaction timestamp, `YYYYMMDDHHMMSS`. Must be within 24 hours of
    /// the current time.
    #[serde(rename = "TIMESTAMP", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Integrity signature over the canonical field subset. Produced by the
    /// signer; never part of its own digest.
    #[serde(rename = "SHA1HASH", skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    /// Whether the transaction settles in the next batch ("1") or is held
    /// for manual settlement ("0"). "multi" enables multi-settle.
    #[serde(rename = "AUTO_SETTLE_FLAG", skip_serializing_if = "Option::is_none")]
    pub auto_settle_flag: Option<String>,

    /// Freeform comment.
    #[serde(rename = "COMMENT1", skip_serializing_if = "Option::is_none")]
    pub comment_one: Option<String>,

    /// Freeform comment.
    #[serde(rename = "COMMENT2", skip_serializing_if = "Option::is_none")]
    pub comment_two: Option<String>,

    /// Request a transaction suitability score ("1") or not ("0").
    #[serde(rename = "RETURN_TSS", skip_serializing_if = "Option::is_none")]
    pub return_tss: Option<String>,

    #[serde(rename = "SHIPPING_CODE", skip_serializing_if = "Option::is_none")]
    pub shipping_code: Option<String>,

    #[serde(rename = "SHIPPING_CO", skip_serializing_if = "Option::is_none")]
    pub shipping_country: Option<String>,

    #[serde(rename = "BILLING_CODE", skip_serializing_if = "Option::is_none")]
    pub billing_code: Option<String>,

    #[serde(rename = "BILLING_CO", skip_serializing_if = "Option::is_none")]
    pub billing_country: Option<String>,

    #[serde(rename = "CUST_NUM", skip_serializing_if = "Option::is_none")]
    pub customer_number: Option<String>,

    #[serde(rename = "VAR_REF", skip_serializing_if = "Option::is_none")]
    pub variable_reference: Option<String>,

    #[serde(rename = "PROD_ID", skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,

    /// Display language for the payment page, e.g. "en" or "en_GB".
    #[serde(rename = "HPP_LANG", skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Text shown on the payment button. Defaults remotely to "Pay Now".
    #[serde(rename = "CARD_PAYMENT_BUTTON", skip_serializing_if = "Option::is_none")]
    pub card_payment_button_text: Option<String>,

    /// Enable card storage for this transaction ("1"/"0").
    #[serde(rename = "CARD_STORAGE_ENABLE", skip_serializing_if = "Option::is_none")]
    pub card_storage_enable: Option<String>,

    /// Offer the payer the option to save their card ("1"/"0").
    #[serde(rename = "OFFER_SAVE_CARD", skip_serializing_if = "Option::is_none")]
    pub offer_save_card: Option<String>,

    /// Payer reference for card-storage transactions.
    #[serde(rename = "PAYER_REF", skip_serializing_if = "Option::is_none")]
    pub payer_reference: Option<String>,

    /// Payment (stored card) reference for card-storage transactions.
    #[serde(rename = "PMT_REF", skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,

    /// Whether the payer already exists ("0"/"1"/"2").
    #[serde(rename = "PAYER_EXIST", skip_serializing_if = "Option::is_none")]
    pub payer_exists: Option<String>,

    /// Marks an open-to-buy transaction: card validated, nothing charged.
    #[serde(rename = "VALIDATE_CARD_ONLY", skip_serializing_if = "Option::is_none")]
    pub validate_card_only: Option<String>,

    /// Per-transaction DCC enable/disable override.
    #[serde(rename = "DCC_ENABLE", skip_serializing_if = "Option::is_none")]
    pub dcc_enable: Option<String>,

    /// Fraud filter mode override: ACTIVE, PASSIVE or OFF.
    #[serde(rename = "HPP_FRAUDFILTER_MODE", skip_serializing_if = "Option::is_none")]
    pub fraud_filter_mode: Option<String>,

    /// Payment page version; "2" selects card management.
    #[serde(rename = "HPP_VERSION", skip_serializing_if = "Option::is_none")]
    pub hpp_version: Option<String>,

    /// Payer reference whose stored payment methods the page should list.
    /// When set, this value replaces [`payer_reference`](Self::payer_reference)
    /// at signing time.
    #[serde(rename = "HPP_SELECT_STORED_CARD", skip_serializing_if = "Option::is_none")]
    pub select_stored_card: Option<String>,

    /// Whether the payment form displays the CVN field ("TRUE"/"FALSE").
    #[serde(rename = "HPP_DISPLAY_CVN", skip_serializing_if = "Option::is_none")]
    pub display_cvn: Option<String>,

    /// Amount to authorise when the card is a debit card.
    #[serde(rename = "HPP_AMOUNT_DEBIT", skip_serializing_if = "Option::is_none")]
    pub amount_debit: Option<String>,

    /// Amount to authorise when the card is a credit card.
    #[serde(rename = "HPP_AMOUNT_CREDIT", skip_serializing_if = "Option::is_none")]
    pub amount_credit: Option<String>,

    /// Amount to authorise when the card is a commercial card.
    #[serde(rename = "HPP_AMOUNT_COMMERCIAL", skip_serializing_if = "Option::is_none")]
    pub amount_commercial: Option<String>,

    /// Caller-defined supplementary name/value pairs. Merged into the wire
    /// object at encode time, split back out at decode time, and echoed by
    /// the remote service in the response. Never part of the signature.
    #[serde(flatten)]
    pub supplementary_data: HashMap<String, String>,
}

impl HppRequest {
    /// Every fixed transport field paired with its wire name, in
    /// declaration order. The transcoder walks this list so the per-field
    /// traversal lives in exactly one place.
    pub fn fields_mut(&mut self) -> Vec<(&'static str, &mut Option<String>)> {
        vec![
            (wire::MERCHANT_ID, &mut self.merchant_id),
            (wire::ACCOUNT, &mut self.account),
            (wire::ORDER_ID, &mut self.order_id),
            (wire::AMOUNT, &mut self.amount),
            (wire::CURRENCY, &mut self.currency),
            (wire::TIMESTAMP, &mut self.timestamp),
            (wire::SHA1HASH, &mut self.hash),
            (wire::AUTO_SETTLE_FLAG, &mut self.auto_settle_flag),
            (wire::COMMENT1, &mut self.comment_one),
            (wire::COMMENT2, &mut self.comment_two),
            (wire::RETURN_TSS, &mut self.return_tss),
            (wire::SHIPPING_CODE, &mut self.shipping_code),
            (wire::SHIPPING_CO, &mut self.shipping_country),
            (wire::BILLING_CODE, &mut self.billing_code),
            (wire::BILLING_CO, &mut self.billing_country),
            (wire::CUST_NUM, &mut self.customer_number),
            (wire::VAR_REF, &mut self.variable_reference),
            (wire::PROD_ID, &mut self.product_id),
            (wire::HPP_LANG, &mut self.language),
            (wire::CARD_PAYMENT_BUTTON, &mut self.card_payment_button_text),
            (wire::CARD_STORAGE_ENABLE, &mut self.card_storage_enable),
            (wire::OFFER_SAVE_CARD, &mut self.offer_save_card),
            (wire::PAYER_REF, &mut self.payer_reference),
            (wire::PMT_REF, &mut self.payment_reference),
            (wire::PAYER_EXIST, &mut self.payer_exists),
            (wire::VALIDATE_CARD_ONLY, &mut self.validate_card_only),
            (wire::DCC_ENABLE, &mut self.dcc_enable),
            (wire::HPP_FRAUDFILTER_MODE, &mut self.fraud_filter_mode),
            (wire::HPP_VERSION, &mut self.hpp_version),
            (wire::HPP_SELECT_STORED_CARD, &mut self.select_stored_card),
            (wire::HPP_DISPLAY_CVN, &mut self.display_cvn),
            (wire::HPP_AMOUNT_DEBIT, &mut self.amount_debit),
            (wire::HPP_AMOUNT_CREDIT, &mut self.amount_credit),
            (wire::HPP_AMOUNT_COMMERCIAL, &mut self.amount_commercial),
        ]
    }
}

/// Inbound response field set posted back by the hosted payment page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HppResponse {
    #[serde(rename = "MERCHANT_ID", skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,

    #[serde(rename = "ACCOUNT", skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    #[serde(rename = "ORDER_ID", skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    #[serde(rename = "AMOUNT", skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,

    /// Authorisation code returned by the bank.
    #[serde(rename = "AUTHCODE", skip_serializing_if = "Option::is_none")]
    pub auth_code: Option<String>,

    #[serde(rename = "TIMESTAMP", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Integrity signature computed by the remote service. Verified, never
    /// trusted as-is.
    #[serde(rename = "SHA1HASH", skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    /// Result code; "00" is success. See [`ResultCode::classify`].
    #[serde(rename = "RESULT", skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,

    /// Human-readable outcome message.
    #[serde(rename = "MESSAGE", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(rename = "CVNRESULT", skip_serializing_if = "Option::is_none")]
    pub cvn_result: Option<String>,

    /// Payment-service reference for the transaction.
    #[serde(rename = "PASREF", skip_serializing_if = "Option::is_none")]
    pub pas_ref: Option<String>,

    #[serde(rename = "BATCHID", skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,

    #[serde(rename = "ECI", skip_serializing_if = "Option::is_none")]
    pub eci: Option<String>,

    #[serde(rename = "CAVV", skip_serializing_if = "Option::is_none")]
    pub cavv: Option<String>,

    #[serde(rename = "XID", skip_serializing_if = "Option::is_none")]
    pub xid: Option<String>,

    #[serde(rename = "COMMENT1", skip_serializing_if = "Option::is_none")]
    pub comment_one: Option<String>,

    #[serde(rename = "COMMENT2", skip_serializing_if = "Option::is_none")]
    pub comment_two: Option<String>,

    /// Payer reference saved by a card-storage transaction.
    #[serde(rename = "SAVED_PAYER_REF", skip_serializing_if = "Option::is_none")]
    pub payer_reference: Option<String>,

    /// Payment reference saved by a card-storage transaction.
    #[serde(rename = "SAVED_PMT_REF", skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,

    /// Transaction suitability scores, keyed by check name.
    #[serde(rename = "TSS", skip_serializing_if = "Option::is_none")]
    pub tss: Option<HashMap<String, String>>,

    /// Supplementary values echoed back from the request.
    #[serde(flatten)]
    pub supplementary_data: HashMap<String, String>,
}

impl HppResponse {
    /// Fixed transport fields paired with wire names, mirroring
    /// [`HppRequest::fields_mut`].
    pub fn fields_mut(&mut self) -> Vec<(&'static str, &mut Option<String>)> {
        vec![
            (wire::MERCHANT_ID, &mut self.merchant_id),
            (wire::ACCOUNT, &mut self.account),
            (wire::ORDER_ID, &mut self.order_id),
            (wire::AMOUNT, &mut self.amount),
            (wire::AUTHCODE, &mut self.auth_code),
            (wire::TIMESTAMP, &mut self.timestamp),
            (wire::SHA1HASH, &mut self.hash),
            (wire::RESULT, &mut self.result),
            (wire::MESSAGE, &mut self.message),
            (wire::CVNRESULT, &mut self.cvn_result),
            (wire::PASREF, &mut self.pas_ref),
            (wire::BATCHID, &mut self.batch_id),
            (wire::ECI, &mut self.eci),
            (wire::CAVV, &mut self.cavv),
            (wire::XID, &mut self.xid),
            (wire::COMMENT1, &mut self.comment_one),
            (wire::COMMENT2, &mut self.comment_two),
            (wire::SAVED_PAYER_REF, &mut self.payer_reference),
            (wire::SAVED_PMT_REF, &mut self.payment_reference),
        ]
    }
}

/// Coarse classification of the response `RESULT` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCode {
    /// "00" - authorised.
    Success,
    /// "1xx" - declined by the bank.
    Declined,
    /// "2xx" - error talking to the bank.
    BankError,
    /// "3xx" - error within the payment service.
    PaymentSystemError,
    /// "5xx" - malformed message or account problem.
    InvalidMessage,
    /// Anything else.
    Other,
}

impl ResultCode {
    /// Classify a raw result code string.
    pub fn classify(result: &str) -> Self {
        match result {
            "00" => ResultCode::Success,
            r if r.len() == 3 && r.starts_with('1') => ResultCode::Declined,
            r if r.len() == 3 && r.starts_with('2') => ResultCode::BankError,
            r if r.len() == 3 && r.starts_with('3') => ResultCode::PaymentSystemError,
            r if r.len() == 3 && r.starts_with('5') => ResultCode::InvalidMessage,
            _ => ResultCode::Other,
        }
    }
}
