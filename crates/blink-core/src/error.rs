//! # Blink Error Types
//!
//! Typed error handling for the ClickCrate blinks service.
//! All blink operations return `Result<T, BlinkError>`.

use thiserror::Error;

/// Core error type for all blink operations.
///
/// Every variant knows the HTTP status it maps to and the message the
/// action client is allowed to see. Validation failures keep their
/// specific wording on the wire; upstream and internal failures collapse
/// to a generic `Bad Request` while the detail stays in the server logs.
#[derive(Debug, Error)]
pub enum BlinkError {
    /// ClickCrate identifier missing or blank
    #[error("ClickCrate not found")]
    ClickCrateNotFound,

    /// ClickCrate resolved but holds no placed product
    #[error("Product not found in ClickCrate: {clickcrate_id}")]
    ProductNotFound { clickcrate_id: String },

    /// Product metadata or listing lookup came back empty
    #[error("Product info not found")]
    ProductInfoNotFound,

    /// One or more required purchase parameters absent or blank
    #[error("Missing required purchase parameters")]
    MissingParameters,

    /// `callback-id` header absent on a payment confirmation
    #[error("Missing callbackId in headers")]
    MissingCallbackId,

    /// No purchase registered under the callback correlation id
    #[error("Purchase details not found for callback id: {callback_id}")]
    PurchaseDetailsNotFound { callback_id: String },

    /// Settlement wallet unconfigured, buyer side cannot be verified
    #[error("Failed to verify tx buyer")]
    BuyerUnverified,

    /// Confirmed payment does not match the expected price and recipient
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    /// Request payload failed schema validation
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// An assembled response violated its own schema
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// External collaborator failure (RPC, callback provider, routing)
    #[error("Upstream error [{service}]: {detail}")]
    Upstream { service: String, detail: String },

    /// Configuration errors (missing env vars, malformed wallet address)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl BlinkError {
    /// Wrap an external collaborator failure
    pub fn upstream(service: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        BlinkError::Upstream {
            service: service.into(),
            detail: detail.to_string(),
        }
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            BlinkError::ClickCrateNotFound => 400,
            BlinkError::ProductNotFound { .. } => 404,
            BlinkError::ProductInfoNotFound => 404,
            BlinkError::MissingParameters => 400,
            BlinkError::MissingCallbackId => 400,
            BlinkError::PurchaseDetailsNotFound { .. } => 404,
            BlinkError::BuyerUnverified => 400,
            BlinkError::InvalidTransaction(_) => 400,
            BlinkError::InvalidPayload(_) => 400,
            BlinkError::SchemaViolation(_) => 400,
            BlinkError::Upstream { .. } => 400,
            BlinkError::Configuration(_) => 500,
            BlinkError::Serialization(_) => 400,
        }
    }

    /// Returns the message exposed to the action client.
    ///
    /// Only the validation tier carries specific wording; everything else
    /// answers `Bad Request` and keeps its detail server-side.
    pub fn client_message(&self) -> &'static str {
        match self {
            BlinkError::ClickCrateNotFound => "ClickCrate not found",
            BlinkError::ProductNotFound { .. } => "Product not found in ClickCrate",
            BlinkError::ProductInfoNotFound => "Product info not found",
            BlinkError::MissingParameters => "Missing required parameters",
            BlinkError::MissingCallbackId => "Missing callbackId in headers",
            BlinkError::PurchaseDetailsNotFound { .. } => "Purchase details not found",
            BlinkError::BuyerUnverified => "Failed to verify tx buyer",
            BlinkError::InvalidTransaction(_) => "Invalid transaction",
            _ => "Bad Request",
        }
    }
}

/// Result type alias for blink operations
pub type BlinkResult<T> = Result<T, BlinkError>;
