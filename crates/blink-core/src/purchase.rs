//! # Purchase Types
//!
//! The buyer-supplied purchase request assembled from an action link, the
//! validators it must clear, and the pending-purchase record registered
//! while payment confirmation is outstanding.

use crate::error::{BlinkError, BlinkResult};
use crate::order::{OrderManager, ShippingDetails};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Lamports per SOL (the chain's smallest denomination)
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Fixed purchase price of one SOL, in lamports
pub const PURCHASE_PRICE_LAMPORTS: u64 = LAMPORTS_PER_SOL;

/// True when `value` is a plausible Solana public key: Base58 alphabet,
/// 32 to 44 characters.
pub fn is_base58_pubkey(value: &str) -> bool {
    static PUBKEY_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = PUBKEY_REGEX.get_or_init(|| {
        Regex::new(r"^[1-9A-HJ-NP-Za-km-z]{32,44}$").expect("invalid pubkey regex")
    });
    regex.is_match(value)
}

/// Syntactic email check, no deliverability guarantees
pub fn is_valid_email(value: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("invalid email regex")
    });
    regex.is_match(value)
}

/// A fully-assembled purchase request: the paying account from the POST
/// body, everything else from the action href query template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    /// Paying account public key
    pub account: String,

    /// ClickCrate being purchased from
    pub clickcrate_id: String,

    pub buyer_name: String,

    pub shipping_email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_phone: Option<String>,

    pub shipping_address: String,

    pub shipping_city: String,

    pub shipping_state_province: String,

    pub shipping_country_region: String,

    pub shipping_zip_code: String,
}

impl PurchaseRequest {
    /// Presence first, formats second.
    ///
    /// A blank required field is reported as missing parameters so the
    /// caller sees one uniform message whether the field was omitted or
    /// left empty. Format checks then require the account and crate id to
    /// be Base58 public keys and the email to be syntactically valid.
    pub fn validate(&self) -> BlinkResult<()> {
        let required = [
            &self.account,
            &self.clickcrate_id,
            &self.buyer_name,
            &self.shipping_email,
            &self.shipping_address,
            &self.shipping_city,
            &self.shipping_state_province,
            &self.shipping_country_region,
            &self.shipping_zip_code,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(BlinkError::MissingParameters);
        }
        if !is_base58_pubkey(&self.account) {
            return Err(BlinkError::InvalidPayload(format!(
                "account is not a Base58 public key: {}",
                self.account
            )));
        }
        if !is_base58_pubkey(&self.clickcrate_id) {
            return Err(BlinkError::InvalidPayload(format!(
                "clickcrateId is not a Base58 public key: {}",
                self.clickcrate_id
            )));
        }
        if !is_valid_email(&self.shipping_email) {
            return Err(BlinkError::InvalidPayload(format!(
                "shippingEmail is not a valid email: {}",
                self.shipping_email
            )));
        }
        Ok(())
    }

    /// Shipping block for registration and routing
    pub fn shipping_details(&self) -> ShippingDetails {
        ShippingDetails {
            shipping_name: self.buyer_name.clone(),
            shipping_email: self.shipping_email.clone(),
            shipping_phone: self.shipping_phone.clone(),
            shipping_address: self.shipping_address.clone(),
            shipping_city: self.shipping_city.clone(),
            shipping_state_province: self.shipping_state_province.clone(),
            shipping_country_region: self.shipping_country_region.clone(),
            shipping_zip_code: self.shipping_zip_code.clone(),
        }
    }
}

/// Everything held under a callback correlation id while payment
/// confirmation is pending.
///
/// Registered at purchase time, resolved again when the payment
/// confirmation arrives, and consumed to settle and route the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseDetails {
    /// Product collection address
    pub product_id: String,

    /// Product listing account address
    pub product_listing_id: String,

    pub clickcrate_id: String,

    pub product_name: String,

    pub quantity: u32,

    pub order_manager: OrderManager,

    /// Paying account that funds the SOL transfer
    pub buyer: String,

    /// Listing owner the order is routed to
    pub seller: String,

    /// Expected payment, in lamports
    pub price_lamports: u64,

    pub shipping: ShippingDetails,
}

impl PurchaseDetails {
    /// Expected payment in SOL display units
    pub fn price_sol(&self) -> f64 {
        self.price_lamports as f64 / LAMPORTS_PER_SOL as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYER: &str = "PayerDemo11111111111111111111111111111111";
    const CRATE_ID: &str = "CrateDemo11111111111111111111111111111111";

    fn sample_request() -> PurchaseRequest {
        PurchaseRequest {
            account: PAYER.to_string(),
            clickcrate_id: CRATE_ID.to_string(),
            buyer_name: "Jane Buyer".to_string(),
            shipping_email: "jane@example.com".to_string(),
            shipping_phone: None,
            shipping_address: "123 Main St".to_string(),
            shipping_city: "Springfield".to_string(),
            shipping_state_province: "IL".to_string(),
            shipping_country_region: "US".to_string(),
            shipping_zip_code: "62701".to_string(),
        }
    }

    #[test]
    fn test_pubkey_format() {
        assert!(is_base58_pubkey(PAYER));
        // System program address, 32 characters
        assert!(is_base58_pubkey("11111111111111111111111111111111"));

        // 0, O, I and l are outside the Base58 alphabet
        assert!(!is_base58_pubkey("0000000000000000000000000000000O"));
        assert!(!is_base58_pubkey("short"));
        assert!(!is_base58_pubkey(""));
        assert!(!is_base58_pubkey(&"1".repeat(45)));
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("a.b+tag@sub.domain.io"));
        assert!(!is_valid_email("jane@"));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("not-an-email"));
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(sample_request().validate().is_ok());
    }

    #[test]
    fn test_each_blank_required_field_is_missing() {
        let blank_one = |f: fn(&mut PurchaseRequest)| {
            let mut request = sample_request();
            f(&mut request);
            request
        };

        let cases = [
            blank_one(|r| r.account.clear()),
            blank_one(|r| r.clickcrate_id.clear()),
            blank_one(|r| r.buyer_name.clear()),
            blank_one(|r| r.shipping_email.clear()),
            blank_one(|r| r.shipping_address.clear()),
            blank_one(|r| r.shipping_city.clear()),
            blank_one(|r| r.shipping_state_province.clear()),
            blank_one(|r| r.shipping_country_region.clear()),
            blank_one(|r| r.shipping_zip_code.clear()),
        ];
        for request in cases {
            assert!(matches!(
                request.validate(),
                Err(BlinkError::MissingParameters)
            ));
        }

        // Whitespace-only counts as blank
        let mut request = sample_request();
        request.buyer_name = "   ".to_string();
        assert!(matches!(
            request.validate(),
            Err(BlinkError::MissingParameters)
        ));
    }

    #[test]
    fn test_phone_is_optional() {
        let mut request = sample_request();
        request.shipping_phone = Some("+1 555 0100".to_string());
        assert!(request.validate().is_ok());

        request.shipping_phone = None;
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_format_errors_after_presence() {
        let mut request = sample_request();
        request.account = "not-base58".to_string();
        assert!(matches!(
            request.validate(),
            Err(BlinkError::InvalidPayload(_))
        ));

        let mut request = sample_request();
        request.shipping_email = "jane-at-example.com".to_string();
        assert!(matches!(
            request.validate(),
            Err(BlinkError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_shipping_details_mapping() {
        let request = sample_request();
        let shipping = request.shipping_details();
        assert_eq!(shipping.shipping_name, "Jane Buyer");
        assert_eq!(shipping.shipping_email, "jane@example.com");
        assert_eq!(shipping.shipping_zip_code, "62701");
    }

    #[test]
    fn test_price_conversion() {
        let details = PurchaseDetails {
            product_id: "ProductDemo111111111111111111111111111111".to_string(),
            product_listing_id: "ListingDemo111111111111111111111111111111".to_string(),
            clickcrate_id: CRATE_ID.to_string(),
            product_name: "Product Title".to_string(),
            quantity: 1,
            order_manager: OrderManager::Clickcrate,
            buyer: PAYER.to_string(),
            seller: "VendorDemo1111111111111111111111111111111".to_string(),
            price_lamports: PURCHASE_PRICE_LAMPORTS,
            shipping: sample_request().shipping_details(),
        };
        assert_eq!(details.price_sol(), 1.0);
    }

    #[test]
    fn test_request_query_field_names() {
        let json = serde_json::to_value(sample_request()).unwrap();
        assert_eq!(json["clickcrateId"], CRATE_ID);
        assert_eq!(json["buyerName"], "Jane Buyer");
        assert_eq!(json["shippingStateProvince"], "IL");
    }
}
