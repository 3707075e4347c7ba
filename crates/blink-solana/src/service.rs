//! # Devnet Solana Service
//!
//! Mock-valued implementation of the `ItemLookup` and `PaymentService`
//! capabilities. Marketplace reads resolve against an in-memory catalog,
//! transaction construction and broadcast produce placeholder objects
//! with real shapes, and callback registration stays local unless a
//! Shyft client is attached. No RPC round-trips happen anywhere.

use crate::callback::{verify_sol_transfer, CallbackRegistry};
use crate::config::SolanaConfig;
use crate::marketplace::{MarketplaceCatalog, MarketplaceEntry};
use crate::shyft::{ShyftClient, PURCHASE_CALLBACK_EVENTS};
use async_trait::async_trait;
use blink_core::{
    BlinkError, BlinkResult, ClickCrateState, CollectionAsset, ItemLookup, PaymentService,
    PaymentTransaction, ProductListing, PurchaseDetails, PurchaseRequest, SettlementTransaction,
    TransactionCallback,
};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Devnet-flavored service backing the blink surface
pub struct DevnetSolanaService {
    config: SolanaConfig,
    catalog: MarketplaceCatalog,
    registry: CallbackRegistry,
    shyft: Option<ShyftClient>,
    resolve_unknown: bool,
}

impl DevnetSolanaService {
    /// Service over an explicit catalog. With `resolve_unknown` set,
    /// lookups for ids the catalog does not hold resolve to the demo
    /// listing instead of nothing.
    pub fn new(config: SolanaConfig, catalog: MarketplaceCatalog, resolve_unknown: bool) -> Self {
        Self {
            config,
            catalog,
            registry: CallbackRegistry::new(),
            shyft: None,
            resolve_unknown,
        }
    }

    /// Demo service: the seeded catalog plus demo resolution of unknown
    /// ids
    pub fn demo(config: SolanaConfig) -> Self {
        Self::new(config, MarketplaceCatalog::demo(), true)
    }

    /// Strict service: only catalog entries resolve
    pub fn strict(config: SolanaConfig, catalog: MarketplaceCatalog) -> Self {
        Self::new(config, catalog, false)
    }

    /// Builder: attach a Shyft client so registrations are mirrored
    /// remotely
    pub fn with_shyft(mut self, shyft: ShyftClient) -> Self {
        self.shyft = Some(shyft);
        self
    }

    /// The pending-purchase registry (read access for diagnostics)
    pub fn registry(&self) -> &CallbackRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SolanaConfig {
        &self.config
    }

    fn resolve_entry(&self, clickcrate_id: &str) -> Option<MarketplaceEntry> {
        if let Some(entry) = self.catalog.get(clickcrate_id) {
            return Some(entry.clone());
        }
        if self.resolve_unknown {
            debug!(clickcrate_id, "unknown ClickCrate, resolving to demo listing");
            return Some(MarketplaceCatalog::demo_entry(clickcrate_id));
        }
        None
    }
}

#[async_trait]
impl ItemLookup for DevnetSolanaService {
    async fn fetch_clickcrate(
        &self,
        clickcrate_id: &str,
    ) -> BlinkResult<Option<ClickCrateState>> {
        let state = self.resolve_entry(clickcrate_id).map(|entry| entry.clickcrate);
        debug!(clickcrate_id, resolved = state.is_some(), "fetched ClickCrate state");
        Ok(state)
    }

    async fn fetch_collection_asset(
        &self,
        product_id: &str,
    ) -> BlinkResult<Option<CollectionAsset>> {
        Ok(self
            .catalog
            .by_product(product_id)
            .map(|entry| entry.asset.clone()))
    }

    async fn fetch_product_listing(
        &self,
        product_id: &str,
    ) -> BlinkResult<Option<ProductListing>> {
        Ok(self
            .catalog
            .by_product(product_id)
            .map(|entry| entry.listing.clone()))
    }
}

#[async_trait]
impl PaymentService for DevnetSolanaService {
    #[instrument(skip(self))]
    async fn create_payment_transaction(
        &self,
        lamports: u64,
        payer: &str,
        recipient: &str,
    ) -> BlinkResult<PaymentTransaction> {
        let transaction = PaymentTransaction::new(lamports, payer, recipient);
        debug!(reference = %transaction.reference, "built payment transaction");
        Ok(transaction)
    }

    async fn register_callback(
        &self,
        request: &PurchaseRequest,
        price_lamports: u64,
    ) -> BlinkResult<String> {
        let entry = self.resolve_entry(&request.clickcrate_id).ok_or_else(|| {
            BlinkError::upstream(
                "marketplace",
                format!("no listing behind ClickCrate {}", request.clickcrate_id),
            )
        })?;

        let details = PurchaseDetails {
            product_id: entry.asset.address,
            product_listing_id: entry.listing.address,
            clickcrate_id: request.clickcrate_id.clone(),
            product_name: entry.asset.name,
            // Blink purchases are single-item
            quantity: 1,
            order_manager: entry.listing.order_manager,
            buyer: request.account.clone(),
            seller: entry.listing.owner,
            price_lamports,
            shipping: request.shipping_details(),
        };

        if let (Some(shyft), Some(callback_url)) = (&self.shyft, self.config.callback_url()) {
            let addresses = vec![self.config.server_wallet.clone()];
            let callback_id = shyft
                .register_callback(&addresses, &callback_url, PURCHASE_CALLBACK_EVENTS)
                .await?;
            self.registry.insert_with_id(&callback_id, details);
            return Ok(callback_id);
        }

        let callback_id = self.registry.insert(details);
        info!(callback_id, "registered purchase locally");
        Ok(callback_id)
    }

    async fn purchase_details(&self, callback_id: &str) -> BlinkResult<Option<PurchaseDetails>> {
        Ok(self.registry.get(callback_id))
    }

    async fn verify_transaction(
        &self,
        callback: &TransactionCallback,
        expected_lamports: u64,
        expected_recipient: &str,
    ) -> BlinkResult<bool> {
        let verified = verify_sol_transfer(callback, expected_lamports, expected_recipient);
        if !verified {
            warn!(
                signature = %callback.signature,
                expected_lamports,
                "payment does not match expected transfer"
            );
        }
        Ok(verified)
    }

    async fn make_purchase(
        &self,
        details: &PurchaseDetails,
        settlement_wallet: &str,
    ) -> BlinkResult<Option<SettlementTransaction>> {
        Ok(Some(SettlementTransaction::new(
            &details.product_listing_id,
            &details.clickcrate_id,
            &details.product_id,
            details.quantity,
            settlement_wallet,
            &details.seller,
        )))
    }

    #[instrument(skip(self, transaction))]
    async fn sign_and_send(&self, transaction: SettlementTransaction) -> BlinkResult<String> {
        // Placeholder broadcast: no keypair, no RPC round-trip
        let signature = devnet_signature();
        info!(
            %signature,
            listing = %transaction.product_listing_id,
            network = %self.config.network,
            "broadcast settlement transaction"
        );
        Ok(signature)
    }
}

/// Placeholder signature, recognizably devnet and unique per call
fn devnet_signature() -> String {
    format!("DevnetSig{}", Uuid::new_v4().simple())
}
