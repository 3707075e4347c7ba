//! # Transaction Objects
//!
//! Unsigned transaction records produced by the payment collaborator. The
//! payment transaction crosses the wire base64-encoded as JSON text for
//! the wallet to decode, sign and submit; the settlement transaction
//! stays server-side until broadcast.

use crate::callback::TransferKind;
use crate::error::{BlinkError, BlinkResult};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An unsigned SOL transfer from the paying account to the settlement
/// wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTransaction {
    /// Always `SOL_TRANSFER` for blink purchases
    #[serde(rename = "type")]
    pub kind: TransferKind,

    /// Paying account public key
    pub from: String,

    /// Settlement wallet public key
    pub to: String,

    /// Transfer amount in lamports
    pub lamports: u64,

    /// Correlates the transfer with its purchase registration
    pub reference: Uuid,

    pub created_at: DateTime<Utc>,
}

impl PaymentTransaction {
    pub fn new(lamports: u64, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            kind: TransferKind::SolTransfer,
            from: from.into(),
            to: to.into(),
            lamports,
            reference: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    /// Serialize to the blink wire form: base64-encoded JSON text
    pub fn to_base64_json(&self) -> BlinkResult<String> {
        let json =
            serde_json::to_vec(self).map_err(|e| BlinkError::Serialization(e.to_string()))?;
        Ok(BASE64.encode(json))
    }

    /// Decode the wire form back into a transaction object
    pub fn from_base64_json(encoded: &str) -> BlinkResult<Self> {
        let bytes = BASE64
            .decode(encoded)
            .map_err(|e| BlinkError::Serialization(format!("invalid base64: {}", e)))?;
        serde_json::from_slice(&bytes).map_err(|e| BlinkError::Serialization(e.to_string()))
    }
}

/// The unsigned marketplace settlement transaction broadcast after a
/// payment is confirmed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementTransaction {
    pub product_listing_id: String,

    pub clickcrate_id: String,

    pub product_id: String,

    pub quantity: u32,

    /// Buyer-side settlement account (the configured server wallet)
    pub buyer: String,

    /// Listing owner credited by the settlement
    pub seller: String,

    pub created_at: DateTime<Utc>,
}

impl SettlementTransaction {
    pub fn new(
        product_listing_id: impl Into<String>,
        clickcrate_id: impl Into<String>,
        product_id: impl Into<String>,
        quantity: u32,
        buyer: impl Into<String>,
        seller: impl Into<String>,
    ) -> Self {
        Self {
            product_listing_id: product_listing_id.into(),
            clickcrate_id: clickcrate_id.into(),
            product_id: product_id.into(),
            quantity,
            buyer: buyer.into(),
            seller: seller.into(),
            created_at: Utc::now(),
        }
    }
}
