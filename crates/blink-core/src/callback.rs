//! # Payment Callback Payload
//!
//! Wire types for the transaction notification posted back once a payment
//! settles on chain. `status` and `type` are fixed literals; any other
//! value fails deserialization, which keeps failed or non-transfer
//! transactions off the confirmation path entirely.

use serde::{Deserialize, Serialize};

/// Literal `Success`, the only status accepted on the callback surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallbackStatus {
    Success,
}

/// Literal `SOL_TRANSFER`, the only transaction kind accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferKind {
    #[serde(rename = "SOL_TRANSFER")]
    SolTransfer,
}

/// Transfer participants and amount. `amount` is in SOL display units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferInfo {
    pub sender: String,
    pub receiver: String,
    pub amount: f64,
}

/// One parsed action inside the settled transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferAction {
    #[serde(rename = "type")]
    pub kind: TransferKind,
    pub info: TransferInfo,
}

/// The payment confirmation payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionCallback {
    /// Transaction signature on chain
    pub signature: String,

    /// Block time as reported by the notifier
    pub timestamp: String,

    /// Network fee in SOL display units
    pub fee: f64,

    pub fee_payer: String,

    pub status: CallbackStatus,

    #[serde(rename = "type")]
    pub kind: TransferKind,

    /// Parsed transfers, checked against the expected payment
    pub actions: Vec<TransferAction>,
}
