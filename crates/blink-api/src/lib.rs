//! # blink-api
//!
//! HTTP API layer for clickcrate-blinks-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Solana Actions endpoints for ClickCrate purchases
//! - Payment confirmation callback handling
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/blinks/{clickcrate_id}` | Purchasable-item blink |
//! | POST | `/blinks/purchase` | Build the payment transaction |
//! | POST | `/blinks/callback/purchase` | Payment confirmation callback |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
