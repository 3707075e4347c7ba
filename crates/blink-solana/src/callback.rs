//! # Callback Registry and Settlement Verification
//!
//! Pending purchases keyed by correlation id, plus the exact-match check
//! run against an inbound payment confirmation.

use blink_core::{PurchaseDetails, TransactionCallback, LAMPORTS_PER_SOL};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// Correlation-id to purchase-details map owned by the payment
/// collaborator. One entry per purchase awaiting confirmation; entries
/// survive until consumed or the process restarts.
#[derive(Debug, Default)]
pub struct CallbackRegistry {
    pending: RwLock<HashMap<String, PurchaseDetails>>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register details under a fresh correlation id
    pub fn insert(&self, details: PurchaseDetails) -> String {
        let callback_id = Uuid::new_v4().to_string();
        self.insert_with_id(&callback_id, details);
        callback_id
    }

    /// Register details under a caller-supplied id (remote registration
    /// already produced one)
    pub fn insert_with_id(&self, callback_id: &str, details: PurchaseDetails) {
        self.pending
            .write()
            .expect("callback registry lock poisoned")
            .insert(callback_id.to_string(), details);
    }

    pub fn get(&self, callback_id: &str) -> Option<PurchaseDetails> {
        self.pending
            .read()
            .expect("callback registry lock poisoned")
            .get(callback_id)
            .cloned()
    }

    pub fn remove(&self, callback_id: &str) -> Option<PurchaseDetails> {
        self.pending
            .write()
            .expect("callback registry lock poisoned")
            .remove(callback_id)
    }

    /// Correlation ids currently awaiting confirmation
    pub fn pending_ids(&self) -> Vec<String> {
        self.pending
            .read()
            .expect("callback registry lock poisoned")
            .keys()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pending
            .read()
            .expect("callback registry lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Exact-match settlement check: some transfer in the confirmation must
/// credit `expected_recipient` with exactly `expected_lamports`.
///
/// Confirmation amounts arrive in SOL display units; rounding to the
/// nearest lamport absorbs float representation error and nothing more.
/// Sender is deliberately not checked, fee sponsorship may make it differ
/// from the registered buyer.
pub fn verify_sol_transfer(
    callback: &TransactionCallback,
    expected_lamports: u64,
    expected_recipient: &str,
) -> bool {
    callback.actions.iter().any(|action| {
        let lamports = (action.info.amount * LAMPORTS_PER_SOL as f64).round() as u64;
        action.info.receiver == expected_recipient && lamports == expected_lamports
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use blink_core::{
        CallbackStatus, OrderManager, ShippingDetails, TransferAction, TransferInfo, TransferKind,
        PURCHASE_PRICE_LAMPORTS,
    };

    const WALLET: &str = "TreasuryDemo111111111111111111111111111111";
    const PAYER: &str = "PayerDemo11111111111111111111111111111111";

    fn sample_details() -> PurchaseDetails {
        PurchaseDetails {
            product_id: "ProductDemo11111111111111111111111111111111".to_string(),
            product_listing_id: "ListingDemo11111111111111111111111111111111".to_string(),
            clickcrate_id: "CrateDemo1111111111111111111111111111111111".to_string(),
            product_name: "Product Title".to_string(),
            quantity: 1,
            order_manager: OrderManager::Clickcrate,
            buyer: PAYER.to_string(),
            seller: "VendorDemo111111111111111111111111111111111".to_string(),
            price_lamports: PURCHASE_PRICE_LAMPORTS,
            shipping: ShippingDetails {
                shipping_name: "Jane Buyer".to_string(),
                shipping_email: "jane@example.com".to_string(),
                shipping_phone: None,
                shipping_address: "123 Main St".to_string(),
                shipping_city: "Springfield".to_string(),
                shipping_state_province: "IL".to_string(),
                shipping_country_region: "US".to_string(),
                shipping_zip_code: "62701".to_string(),
            },
        }
    }

    fn confirmation_of(amount: f64, receiver: &str) -> TransactionCallback {
        TransactionCallback {
            signature: "5KtP3EzbadzgeWmBsCiJsgHDAf7jM9MbnPwHzMWYAHaLGWrTqnaUBpCLEzu4Mcbuy"
                .to_string(),
            timestamp: "2024-07-01T12:00:00.000Z".to_string(),
            fee: 0.000005,
            fee_payer: PAYER.to_string(),
            status: CallbackStatus::Success,
            kind: TransferKind::SolTransfer,
            actions: vec![TransferAction {
                kind: TransferKind::SolTransfer,
                info: TransferInfo {
                    sender: PAYER.to_string(),
                    receiver: receiver.to_string(),
                    amount,
                },
            }],
        }
    }

    #[test]
    fn test_registry_round_trip() {
        let registry = CallbackRegistry::new();
        assert!(registry.is_empty());

        let id = registry.insert(sample_details());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(&id).unwrap().product_name, "Product Title");
        assert!(registry.pending_ids().contains(&id));

        // Unknown ids stay unknown
        assert!(registry.get("nope").is_none());

        let removed = registry.remove(&id).unwrap();
        assert_eq!(removed.buyer, PAYER);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registry_fresh_ids() {
        let registry = CallbackRegistry::new();
        let a = registry.insert(sample_details());
        let b = registry.insert(sample_details());
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_registry_caller_supplied_id() {
        let registry = CallbackRegistry::new();
        registry.insert_with_id("shyft-cb-42", sample_details());
        assert!(registry.get("shyft-cb-42").is_some());
    }

    #[test]
    fn test_verify_exact_amount_and_recipient() {
        let callback = confirmation_of(1.0, WALLET);
        assert!(verify_sol_transfer(&callback, PURCHASE_PRICE_LAMPORTS, WALLET));
    }

    #[test]
    fn test_verify_rejects_wrong_amount() {
        let callback = confirmation_of(0.5, WALLET);
        assert!(!verify_sol_transfer(&callback, PURCHASE_PRICE_LAMPORTS, WALLET));

        // Off by a single lamport
        let callback = confirmation_of(0.999999999, WALLET);
        assert!(!verify_sol_transfer(&callback, PURCHASE_PRICE_LAMPORTS, WALLET));
    }

    #[test]
    fn test_verify_rejects_wrong_recipient() {
        let callback = confirmation_of(1.0, PAYER);
        assert!(!verify_sol_transfer(&callback, PURCHASE_PRICE_LAMPORTS, WALLET));
    }

    #[test]
    fn test_verify_rejects_empty_actions() {
        let mut callback = confirmation_of(1.0, WALLET);
        callback.actions.clear();
        assert!(!verify_sol_transfer(&callback, PURCHASE_PRICE_LAMPORTS, WALLET));
    }

    #[test]
    fn test_verify_scans_all_actions() {
        let mut callback = confirmation_of(0.000005, PAYER);
        callback.actions.push(TransferAction {
            kind: TransferKind::SolTransfer,
            info: TransferInfo {
                sender: PAYER.to_string(),
                receiver: WALLET.to_string(),
                amount: 1.0,
            },
        });
        assert!(verify_sol_transfer(&callback, PURCHASE_PRICE_LAMPORTS, WALLET));
    }

    #[test]
    fn test_verify_absorbs_float_representation_only() {
        // 0.1 SOL is not exactly representable; rounding keeps it exact
        let callback = confirmation_of(0.1, WALLET);
        assert!(verify_sol_transfer(&callback, 100_000_000, WALLET));
    }
}
