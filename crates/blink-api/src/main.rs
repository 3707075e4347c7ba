//! # ClickCrate Blinks
//!
//! Solana Actions server for ClickCrate purchases.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export SERVER_WALLET_ADDRESS=...
//! export SOLANA_NETWORK=devnet
//!
//! # Run the server
//! clickcrate-blinks
//! ```

use blink_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Print banner
    print_banner();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Settlement wallet: {}", state.config.server_wallet);

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("🛒 ClickCrate Blinks starting on http://{}", addr);

    if !is_prod {
        info!("📦 Blink: GET http://{}/blinks/{{clickcrateId}}", addr);
        info!("💸 Purchase: POST http://{}/blinks/purchase", addr);
        info!("🔔 Callback: POST http://{}/blinks/callback/purchase", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  🛒 ClickCrate Blinks 🛒
  ━━━━━━━━━━━━━━━━━━━━━━━
  Shopify for Solana blinks
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
