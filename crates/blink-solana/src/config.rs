//! # Solana Configuration
//!
//! Configuration for the chain-side collaborators. The only secret is the
//! optional Shyft API key; the settlement wallet address is public but
//! must be a well-formed key, because every payment is verified against
//! it.

use blink_core::{is_base58_pubkey, BlinkError};
use serde::{Deserialize, Serialize};
use std::env;

/// Cluster the service settles against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    Devnet,
    MainnetBeta,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Devnet => "devnet",
            Network::MainnetBeta => "mainnet-beta",
        }
    }

    /// Public RPC endpoint for the cluster
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Network::Devnet => "https://api.devnet.solana.com",
            Network::MainnetBeta => "https://api.mainnet-beta.solana.com",
        }
    }
}

impl Default for Network {
    fn default() -> Self {
        Network::Devnet
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for the Solana and Shyft collaborators
#[derive(Debug, Clone)]
pub struct SolanaConfig {
    /// JSON-RPC endpoint
    pub rpc_url: String,

    pub network: Network,

    /// Settlement wallet every purchase payment must land in
    pub server_wallet: String,

    /// Shyft API key; callback registration stays local without one
    pub shyft_api_key: Option<String>,

    /// Public base URL payment confirmations are delivered to
    pub callback_base_url: Option<String>,
}

impl SolanaConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `SERVER_WALLET_ADDRESS`
    ///
    /// Optional env vars:
    /// - `SOLANA_NETWORK` (`devnet` or `mainnet-beta`, defaults to devnet)
    /// - `SOLANA_RPC_URL` (defaults to the cluster's public endpoint)
    /// - `SHYFT_API_KEY`
    /// - `CALLBACK_BASE_URL`
    pub fn from_env() -> Result<Self, BlinkError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let server_wallet = env::var("SERVER_WALLET_ADDRESS").map_err(|_| {
            BlinkError::Configuration("SERVER_WALLET_ADDRESS not set".to_string())
        })?;

        let network = match env::var("SOLANA_NETWORK").as_deref() {
            Ok("mainnet-beta") => Network::MainnetBeta,
            _ => Network::Devnet,
        };

        let rpc_url = env::var("SOLANA_RPC_URL")
            .unwrap_or_else(|_| network.default_rpc_url().to_string());

        let config = Self {
            rpc_url,
            network,
            server_wallet,
            shyft_api_key: env::var("SHYFT_API_KEY").ok(),
            callback_base_url: env::var("CALLBACK_BASE_URL").ok(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a devnet config with explicit values (for testing)
    pub fn new(server_wallet: impl Into<String>) -> Self {
        let network = Network::Devnet;
        Self {
            rpc_url: network.default_rpc_url().to_string(),
            network,
            server_wallet: server_wallet.into(),
            shyft_api_key: None,
            callback_base_url: None,
        }
    }

    /// Check the wallet address format
    pub fn validate(&self) -> Result<(), BlinkError> {
        if !is_base58_pubkey(&self.server_wallet) {
            return Err(BlinkError::Configuration(
                "SERVER_WALLET_ADDRESS must be a Base58 public key (32-44 chars)".to_string(),
            ));
        }
        Ok(())
    }

    /// Builder: set the public base URL confirmations are posted to
    pub fn with_callback_base_url(mut self, url: impl Into<String>) -> Self {
        self.callback_base_url = Some(url.into());
        self
    }

    /// Full delivery URL for purchase confirmations, if a base is set
    pub fn callback_url(&self) -> Option<String> {
        self.callback_base_url
            .as_ref()
            .map(|base| format!("{}/blinks/callback/purchase", base.trim_end_matches('/')))
    }
}
