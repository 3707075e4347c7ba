//! # Marketplace Lookup Types
//!
//! What the item-lookup collaborator resolves for a ClickCrate id: the
//! registry state, the placed product's display metadata, and the listing
//! account carrying its commercial terms.

use crate::order::OrderManager;
use crate::purchase::LAMPORTS_PER_SOL;
use serde::{Deserialize, Serialize};

/// On-chain ClickCrate registry state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickCrateState {
    /// Registry account address
    pub address: String,

    /// Account that registered the ClickCrate
    pub owner: String,

    #[serde(default)]
    pub manager: OrderManager,

    /// Currently placed product (collection address), if any
    #[serde(default)]
    pub product: Option<String>,
}

/// Display metadata for a placed product collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionAsset {
    /// Collection account address
    pub address: String,

    /// Display name, becomes the blink title
    pub name: String,

    /// Image URL, becomes the blink icon
    pub image: String,

    #[serde(default)]
    pub description: String,
}

/// Product listing account: the commercial terms of a placed product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductListing {
    /// Listing account address
    pub address: String,

    /// Listing owner, the seller orders are routed to
    pub owner: String,

    pub price_lamports: u64,

    pub in_stock: u32,

    pub size: String,

    /// Free-form delivery estimate, e.g. `~2 weeks`
    pub delivery_estimate: String,

    #[serde(default)]
    pub order_manager: OrderManager,
}

impl ProductListing {
    /// Listing price in SOL display units
    pub fn price_sol(&self) -> f64 {
        self.price_lamports as f64 / LAMPORTS_PER_SOL as f64
    }

    pub fn is_sold_out(&self) -> bool {
        self.in_stock == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_display_units() {
        let listing = ProductListing {
            address: "ListingDemo111111111111111111111111111111".to_string(),
            owner: "VendorDemo1111111111111111111111111111111".to_string(),
            price_lamports: LAMPORTS_PER_SOL,
            in_stock: 10,
            size: "Medium".to_string(),
            delivery_estimate: "~2 weeks".to_string(),
            order_manager: OrderManager::Clickcrate,
        };
        assert_eq!(listing.price_sol(), 1.0);
        assert!(!listing.is_sold_out());

        let half = ProductListing {
            price_lamports: LAMPORTS_PER_SOL / 2,
            in_stock: 0,
            ..listing
        };
        assert_eq!(half.price_sol(), 0.5);
        assert!(half.is_sold_out());
    }

    #[test]
    fn test_crate_state_defaults() {
        let json = serde_json::json!({
            "address": "CrateDemo11111111111111111111111111111111",
            "owner": "KeeperDemo1111111111111111111111111111111"
        });
        let state: ClickCrateState = serde_json::from_value(json).unwrap();
        assert_eq!(state.manager, OrderManager::Clickcrate);
        assert!(state.product.is_none());
    }
}
