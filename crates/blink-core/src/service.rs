//! # Capability Traits
//!
//! The three collaborators the blink handlers depend on, expressed as
//! traits so chain-backed services and test doubles are interchangeable.
//! Handlers hold `Arc<dyn ...>` aliases and never construct a concrete
//! service themselves.

use crate::callback::TransactionCallback;
use crate::error::BlinkResult;
use crate::listing::{ClickCrateState, CollectionAsset, ProductListing};
use crate::order::{Order, OrderData, OrderStatus};
use crate::purchase::{PurchaseDetails, PurchaseRequest};
use crate::transaction::{PaymentTransaction, SettlementTransaction};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Resolves a ClickCrate id to its product reference and listing data.
///
/// `None` means the thing looked up does not exist; `Err` means the
/// lookup itself failed.
#[async_trait]
pub trait ItemLookup: Send + Sync {
    /// Fetch the ClickCrate registry state
    async fn fetch_clickcrate(&self, clickcrate_id: &str)
        -> BlinkResult<Option<ClickCrateState>>;

    /// Fetch display metadata for a placed product
    async fn fetch_collection_asset(&self, product_id: &str)
        -> BlinkResult<Option<CollectionAsset>>;

    /// Fetch the listing account for a placed product
    async fn fetch_product_listing(&self, product_id: &str)
        -> BlinkResult<Option<ProductListing>>;
}

/// Payment-side collaborator: builds, verifies and broadcasts the
/// transactions behind a purchase, and owns the pending-purchase registry.
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Construct the unsigned payer-to-recipient payment transaction
    async fn create_payment_transaction(
        &self,
        lamports: u64,
        payer: &str,
        recipient: &str,
    ) -> BlinkResult<PaymentTransaction>;

    /// Register the pending purchase for later correlation and return the
    /// callback correlation id. The service resolves the product, listing
    /// and seller behind the requested ClickCrate itself.
    async fn register_callback(
        &self,
        request: &PurchaseRequest,
        price_lamports: u64,
    ) -> BlinkResult<String>;

    /// Resolve previously registered purchase details
    async fn purchase_details(&self, callback_id: &str) -> BlinkResult<Option<PurchaseDetails>>;

    /// Check a settled payment against the expected amount and recipient
    async fn verify_transaction(
        &self,
        callback: &TransactionCallback,
        expected_lamports: u64,
        expected_recipient: &str,
    ) -> BlinkResult<bool>;

    /// Construct the marketplace settlement transaction for a confirmed
    /// purchase. `None` means the marketplace produced nothing to sign.
    async fn make_purchase(
        &self,
        details: &PurchaseDetails,
        settlement_wallet: &str,
    ) -> BlinkResult<Option<SettlementTransaction>>;

    /// Sign and broadcast a settlement transaction, returning its
    /// signature
    async fn sign_and_send(&self, transaction: SettlementTransaction) -> BlinkResult<String>;
}

/// Routes a confirmed order to the fulfillment system owned by its seller
#[async_trait]
pub trait OrderRouter: Send + Sync {
    /// Dispatch a routing descriptor and materialize the resulting order.
    /// Expected to be idempotent per settled payment.
    async fn route_order(&self, order: OrderData, seller: &str) -> BlinkResult<Order>;
}

/// Boxed trait object for handler injection
pub type BoxedItemLookup = Arc<dyn ItemLookup>;

/// Boxed trait object for handler injection
pub type BoxedPaymentService = Arc<dyn PaymentService>;

/// Boxed trait object for handler injection
pub type BoxedOrderRouter = Arc<dyn OrderRouter>;

/// Default router: validates the descriptor, logs the dispatch and
/// materializes the confirmed order without contacting any fulfillment
/// backend.
pub struct LoggingOrderRouter;

#[async_trait]
impl OrderRouter for LoggingOrderRouter {
    async fn route_order(&self, order: OrderData, seller: &str) -> BlinkResult<Order> {
        order.validate()?;
        info!(
            seller,
            manager = %order.order_manager,
            product = %order.product_id,
            quantity = order.quantity,
            "routing order"
        );
        Ok(Order::from_data(order, seller, OrderStatus::Confirmed))
    }
}
