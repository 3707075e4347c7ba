//! # blink-core
//!
//! Core types and capability traits for the ClickCrate blinks service.
//!
//! This crate provides:
//! - `Blink`, `LinkedAction` and `ActionError` for the Solana Actions wire surface
//! - `PurchaseRequest` and `PurchaseDetails` for the purchase flow
//! - `TransactionCallback` for the payment confirmation payload
//! - `Order`, `OrderData` and `OrderStatus` for routed orders
//! - `ItemLookup`, `PaymentService` and `OrderRouter` capability traits
//! - `BlinkError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use blink_core::{PurchaseRequest, PURCHASE_PRICE_LAMPORTS};
//!
//! // Validate a purchase request assembled from an action link
//! request.validate()?;
//!
//! // Build the unsigned payment transaction through the injected service
//! let tx = payments
//!     .create_payment_transaction(PURCHASE_PRICE_LAMPORTS, &request.account, &wallet)
//!     .await?;
//!
//! // Hand the wallet its wire form
//! let encoded = tx.to_base64_json()?;
//! ```

pub mod action;
pub mod callback;
pub mod error;
pub mod listing;
pub mod order;
pub mod purchase;
pub mod service;
pub mod transaction;

// Re-exports for convenience
pub use action::{is_http_url, ActionError, ActionLinks, ActionParameter, Blink, LinkedAction};
pub use callback::{
    CallbackStatus, TransactionCallback, TransferAction, TransferInfo, TransferKind,
};
pub use error::{BlinkError, BlinkResult};
pub use listing::{ClickCrateState, CollectionAsset, ProductListing};
pub use order::{Order, OrderData, OrderManager, OrderStatus, ShippingDetails};
pub use purchase::{
    is_base58_pubkey, is_valid_email, PurchaseDetails, PurchaseRequest, LAMPORTS_PER_SOL,
    PURCHASE_PRICE_LAMPORTS,
};
pub use service::{
    BoxedItemLookup, BoxedOrderRouter, BoxedPaymentService, ItemLookup, LoggingOrderRouter,
    OrderRouter, PaymentService,
};
pub use transaction::{PaymentTransaction, SettlementTransaction};
