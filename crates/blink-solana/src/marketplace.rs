//! # Marketplace Catalog
//!
//! In-memory stand-in for on-chain marketplace reads. Each entry bundles
//! the three accounts a blink needs: the ClickCrate registry state, the
//! placed product's collection metadata, and its listing. Entries load
//! from TOML or fall back to the seeded demo listing.

use blink_core::{
    ClickCrateState, CollectionAsset, OrderManager, ProductListing, LAMPORTS_PER_SOL,
};
use serde::{Deserialize, Serialize};

/// Devnet demo ClickCrate registry address
pub const DEMO_CLICKCRATE_ID: &str = "CrateDemo1111111111111111111111111111111111";

/// Devnet demo product collection address
pub const DEMO_PRODUCT_ID: &str = "ProductDemo11111111111111111111111111111111";

/// Devnet demo product listing address
pub const DEMO_LISTING_ID: &str = "ListingDemo11111111111111111111111111111111";

/// Devnet demo listing owner (the seller)
pub const DEMO_SELLER: &str = "VendorDemo111111111111111111111111111111111";

/// Devnet demo ClickCrate operator
pub const DEMO_KEEPER: &str = "KeeperDemo111111111111111111111111111111111";

/// One resolvable ClickCrate: registry state plus product metadata plus
/// listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceEntry {
    pub clickcrate: ClickCrateState,
    pub asset: CollectionAsset,
    pub listing: ProductListing,
}

/// The catalog lookups resolve against
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketplaceCatalog {
    #[serde(default)]
    pub entries: Vec<MarketplaceEntry>,
}

impl MarketplaceCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Load catalog from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Catalog holding only the demo listing
    pub fn demo() -> Self {
        let mut catalog = Self::new();
        catalog.add(Self::demo_entry(DEMO_CLICKCRATE_ID));
        catalog
    }

    /// The demo listing registered under an arbitrary ClickCrate address
    pub fn demo_entry(clickcrate_id: &str) -> MarketplaceEntry {
        MarketplaceEntry {
            clickcrate: ClickCrateState {
                address: clickcrate_id.to_string(),
                owner: DEMO_KEEPER.to_string(),
                manager: OrderManager::Clickcrate,
                product: Some(DEMO_PRODUCT_ID.to_string()),
            },
            asset: CollectionAsset {
                address: DEMO_PRODUCT_ID.to_string(),
                name: "Product Title".to_string(),
                image: "https://example.com/icon.png".to_string(),
                description: "Sample product description".to_string(),
            },
            listing: ProductListing {
                address: DEMO_LISTING_ID.to_string(),
                owner: DEMO_SELLER.to_string(),
                price_lamports: LAMPORTS_PER_SOL,
                in_stock: 10,
                size: "Medium".to_string(),
                delivery_estimate: "~2 weeks".to_string(),
                order_manager: OrderManager::Clickcrate,
            },
        }
    }

    /// Add an entry
    pub fn add(&mut self, entry: MarketplaceEntry) {
        self.entries.push(entry);
    }

    /// Look up by ClickCrate registry address
    pub fn get(&self, clickcrate_id: &str) -> Option<&MarketplaceEntry> {
        self.entries
            .iter()
            .find(|entry| entry.clickcrate.address == clickcrate_id)
    }

    /// Look up by product collection address
    pub fn by_product(&self, product_id: &str) -> Option<&MarketplaceEntry> {
        self.entries
            .iter()
            .find(|entry| entry.asset.address == product_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blink_core::is_base58_pubkey;

    #[test]
    fn test_demo_addresses_are_plausible_keys() {
        for address in [
            DEMO_CLICKCRATE_ID,
            DEMO_PRODUCT_ID,
            DEMO_LISTING_ID,
            DEMO_SELLER,
            DEMO_KEEPER,
        ] {
            assert!(is_base58_pubkey(address), "not a Base58 key: {}", address);
        }
    }

    #[test]
    fn test_demo_catalog_resolves() {
        let catalog = MarketplaceCatalog::demo();
        assert_eq!(catalog.len(), 1);

        let entry = catalog.get(DEMO_CLICKCRATE_ID).unwrap();
        assert_eq!(entry.clickcrate.product.as_deref(), Some(DEMO_PRODUCT_ID));
        assert_eq!(entry.asset.name, "Product Title");
        assert_eq!(entry.listing.price_lamports, LAMPORTS_PER_SOL);
        assert_eq!(entry.listing.in_stock, 10);

        let by_product = catalog.by_product(DEMO_PRODUCT_ID).unwrap();
        assert_eq!(by_product.listing.owner, DEMO_SELLER);
    }

    #[test]
    fn test_unknown_ids_do_not_resolve() {
        let catalog = MarketplaceCatalog::demo();
        assert!(catalog.get("UnknownCrate111111111111111111111111111111").is_none());
        assert!(catalog.by_product("UnknownAsset111111111111111111111111111111").is_none());
    }

    #[test]
    fn test_demo_entry_takes_requested_address() {
        let entry = MarketplaceCatalog::demo_entry("Requested1111111111111111111111111111111111");
        assert_eq!(
            entry.clickcrate.address,
            "Requested1111111111111111111111111111111111"
        );
        assert_eq!(entry.asset.address, DEMO_PRODUCT_ID);
    }

    #[test]
    fn test_from_toml() {
        let catalog = MarketplaceCatalog::from_toml(
            r#"
            [[entries]]

            [entries.clickcrate]
            address = "CrateDemo1111111111111111111111111111111111"
            owner = "KeeperDemo111111111111111111111111111111111"
            manager = "clickcrate"
            product = "ProductDemo11111111111111111111111111111111"

            [entries.asset]
            address = "ProductDemo11111111111111111111111111111111"
            name = "Devnet Hoodie"
            image = "https://example.com/hoodie.png"
            description = "A hoodie for devnet shoppers"

            [entries.listing]
            address = "ListingDemo11111111111111111111111111111111"
            owner = "VendorDemo111111111111111111111111111111111"
            price_lamports = 500000000
            in_stock = 3
            size = "Large"
            delivery_estimate = "~1 week"
            order_manager = "shopify"
            "#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 1);
        let entry = catalog.get(DEMO_CLICKCRATE_ID).unwrap();
        assert_eq!(entry.asset.name, "Devnet Hoodie");
        assert_eq!(entry.listing.price_lamports, 500_000_000);
        assert_eq!(entry.listing.order_manager, OrderManager::Shopify);
    }

    #[test]
    fn test_from_toml_empty_input() {
        let catalog = MarketplaceCatalog::from_toml("").unwrap();
        assert!(catalog.is_empty());
    }
}
