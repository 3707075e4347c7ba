//! # Order Types
//!
//! The routed order shape produced once a payment settles, plus the
//! lifecycle an order-management system walks the order through.

use crate::error::{BlinkError, BlinkResult};
use crate::purchase::is_base58_pubkey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// External fulfillment system responsible for a purchased product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderManager {
    /// Native ClickCrate order management
    Clickcrate,
    /// Shopify storefront
    Shopify,
    /// Square point of sale
    Square,
}

impl OrderManager {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderManager::Clickcrate => "clickcrate",
            OrderManager::Shopify => "shopify",
            OrderManager::Square => "square",
        }
    }
}

impl Default for OrderManager {
    fn default() -> Self {
        OrderManager::Clickcrate
    }
}

impl std::fmt::Display for OrderManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Product registered but not placed in a ClickCrate
    Pending,
    /// Product placed and purchasable
    Placed,
    /// Payment received, order routed to its manager
    Confirmed,
    /// Order fulfilled and in transit
    Fulfilled,
    /// Product delivered to the buyer
    Delivered,
    /// Return window closed, order finalized
    Completed,
    /// Order cancelled
    Cancelled,
}

impl OrderStatus {
    /// Terminal states admit no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// The linear fulfillment progression. Cancellation is reachable from
    /// any non-terminal state.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        if next == OrderStatus::Cancelled {
            return true;
        }
        matches!(
            (*self, next),
            (OrderStatus::Pending, OrderStatus::Placed)
                | (OrderStatus::Placed, OrderStatus::Confirmed)
                | (OrderStatus::Confirmed, OrderStatus::Fulfilled)
                | (OrderStatus::Fulfilled, OrderStatus::Delivered)
                | (OrderStatus::Delivered, OrderStatus::Completed)
        )
    }
}

/// Shipping and contact block carried on purchases and routed orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDetails {
    /// Recipient name (the buyer name from the action parameters)
    pub shipping_name: String,

    /// Order confirmations go here
    pub shipping_email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_phone: Option<String>,

    pub shipping_address: String,

    pub shipping_city: String,

    pub shipping_state_province: String,

    pub shipping_country_region: String,

    pub shipping_zip_code: String,
}

/// Routing descriptor handed to the order router once payment settles.
///
/// `total_price` is in SOL display units, converted from lamports by the
/// callback flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderData {
    pub product_id: String,

    /// Product name (denormalized for display)
    pub product_name: String,

    /// Paying account
    pub buyer_id: String,

    /// Listing owner receiving the order
    pub seller_id: String,

    pub quantity: u32,

    /// Total in SOL display units
    pub total_price: f64,

    pub order_manager: OrderManager,

    #[serde(flatten)]
    pub shipping: ShippingDetails,
}

impl OrderData {
    /// Check the descriptor before routing: participant ids must be
    /// plausible public keys and the commercial fields positive.
    pub fn validate(&self) -> BlinkResult<()> {
        if !is_base58_pubkey(&self.product_id) {
            return Err(BlinkError::SchemaViolation(format!(
                "order productId is not a public key: {}",
                self.product_id
            )));
        }
        if !is_base58_pubkey(&self.buyer_id) {
            return Err(BlinkError::SchemaViolation(format!(
                "order buyerId is not a public key: {}",
                self.buyer_id
            )));
        }
        if !is_base58_pubkey(&self.seller_id) {
            return Err(BlinkError::SchemaViolation(format!(
                "order sellerId is not a public key: {}",
                self.seller_id
            )));
        }
        if self.quantity == 0 {
            return Err(BlinkError::SchemaViolation(
                "order quantity must be positive".to_string(),
            ));
        }
        if self.total_price <= 0.0 {
            return Err(BlinkError::SchemaViolation(
                "order totalPrice must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// A routed order as materialized by an order-management system
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID (generated)
    pub id: Uuid,

    pub product_id: String,

    pub product_name: String,

    pub buyer_id: String,

    pub seller_id: String,

    pub quantity: u32,

    /// Total in SOL display units
    pub total_price: f64,

    pub order_manager: OrderManager,

    /// Account the order record is created under
    pub creator_id: String,

    pub status: OrderStatus,

    #[serde(flatten)]
    pub shipping: ShippingDetails,

    /// Created timestamp
    pub created_at: DateTime<Utc>,

    /// Last status change
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Materialize an order from its routing descriptor
    pub fn from_data(data: OrderData, creator_id: impl Into<String>, status: OrderStatus) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            product_id: data.product_id,
            product_name: data.product_name,
            buyer_id: data.buyer_id,
            seller_id: data.seller_id,
            quantity: data.quantity,
            total_price: data.total_price,
            order_manager: data.order_manager,
            creator_id: creator_id.into(),
            status,
            shipping: data.shipping,
            created_at: now,
            updated_at: now,
        }
    }
}
