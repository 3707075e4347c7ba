//! # Application State
//!
//! Shared state for the Axum application. Handlers see only the three
//! injected capabilities plus server configuration; the concrete devnet
//! service is wired here and nowhere else.

use blink_core::{BoxedItemLookup, BoxedOrderRouter, BoxedPaymentService, LoggingOrderRouter};
use blink_solana::{DevnetSolanaService, MarketplaceCatalog, ShyftClient, SolanaConfig};
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Settlement wallet payments are verified against
    pub server_wallet: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            server_wallet: std::env::var("SERVER_WALLET_ADDRESS").unwrap_or_default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Marketplace lookups
    pub items: BoxedItemLookup,
    /// Transaction construction, verification and the purchase registry
    pub payments: BoxedPaymentService,
    /// Order routing once payment settles
    pub orders: BoxedOrderRouter,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create an AppState backed by the devnet Solana service.
    ///
    /// The marketplace catalog loads from `config/marketplace.toml` when
    /// present; otherwise the demo listing is used. Unknown ClickCrate
    /// ids resolve to the demo listing either way. A Shyft client is
    /// attached only when `SHYFT_API_KEY` is configured.
    pub fn new() -> anyhow::Result<Self> {
        let mut config = AppConfig::from_env();

        let solana_config = SolanaConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Solana service: {}", e))?;
        // One source of truth for the wallet handlers verify against
        config.server_wallet = solana_config.server_wallet.clone();

        let catalog = load_marketplace_catalog()?;

        let shyft = solana_config
            .shyft_api_key
            .clone()
            .map(|key| ShyftClient::new(key, solana_config.network));

        let mut service = DevnetSolanaService::new(solana_config, catalog, true);
        if let Some(shyft) = shyft {
            service = service.with_shyft(shyft);
        }
        let service = Arc::new(service);

        Ok(Self {
            items: service.clone(),
            payments: service,
            orders: Arc::new(LoggingOrderRouter),
            config,
        })
    }

    /// Assemble state from explicit collaborators (for tests and custom
    /// wiring)
    pub fn with_services(
        items: BoxedItemLookup,
        payments: BoxedPaymentService,
        orders: BoxedOrderRouter,
        config: AppConfig,
    ) -> Self {
        Self {
            items,
            payments,
            orders,
            config,
        }
    }
}

/// Load the marketplace catalog from a config file
fn load_marketplace_catalog() -> anyhow::Result<MarketplaceCatalog> {
    // Try to load from config/marketplace.toml
    let config_paths = [
        "config/marketplace.toml",
        "../config/marketplace.toml",
        "../../config/marketplace.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let catalog = MarketplaceCatalog::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded {} marketplace entries from {}", catalog.len(), path);
            return Ok(catalog);
        }
    }

    // Fall back to the demo listing if no config found
    tracing::warn!("No marketplace catalog found, using demo listing");
    Ok(MarketplaceCatalog::demo())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_defaults() {
        // Clear env vars for test
        std::env::remove_var("HOST");
        std::env::remove_var("PORT");

        let config = AppConfig::from_env();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            server_wallet: "TreasuryDemo111111111111111111111111111111".to_string(),
            environment: "test".to_string(),
        };

        let addr = config.socket_addr();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }
}
