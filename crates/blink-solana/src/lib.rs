//! # blink-solana
//!
//! Devnet Solana and Shyft collaborators for the ClickCrate blinks
//! service.
//!
//! This crate provides:
//!
//! 1. **DevnetSolanaService** - `ItemLookup` + `PaymentService` in one place
//!    - Marketplace reads against an in-memory catalog
//!    - Placeholder transaction construction and broadcast
//!    - The pending-purchase callback registry
//!
//! 2. **ShyftClient** - callback registration against the Shyft API
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use blink_solana::{DevnetSolanaService, SolanaConfig};
//!
//! // Demo service: any ClickCrate id resolves to the demo listing
//! let config = SolanaConfig::from_env()?;
//! let service = DevnetSolanaService::demo(config);
//!
//! let state = service.fetch_clickcrate(&clickcrate_id).await?;
//! ```
//!
//! ## Remote callback registration
//!
//! ```rust,ignore
//! use blink_solana::{DevnetSolanaService, ShyftClient, SolanaConfig};
//!
//! let config = SolanaConfig::from_env()?;
//! let shyft = ShyftClient::new(api_key, config.network);
//! let service = DevnetSolanaService::demo(config).with_shyft(shyft);
//! ```

pub mod callback;
pub mod config;
pub mod marketplace;
pub mod service;
pub mod shyft;

// Re-exports
pub use callback::{verify_sol_transfer, CallbackRegistry};
pub use config::{Network, SolanaConfig};
pub use marketplace::{MarketplaceCatalog, MarketplaceEntry};
pub use service::DevnetSolanaService;
pub use shyft::{ShyftClient, PURCHASE_CALLBACK_EVENTS, SHYFT_API_BASE};
