//! # Shyft Callback API Client
//!
//! Registers transaction callbacks with the Shyft API so settled payments
//! touching the settlement wallet are posted back to this service. Only
//! the callback-create endpoint is wrapped; confirmations arrive on our
//! own HTTP surface.

use crate::config::Network;
use blink_core::{BlinkError, BlinkResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

/// Production Shyft API base URL
pub const SHYFT_API_BASE: &str = "https://api.shyft.to";

/// Transaction kinds a purchase callback subscribes to
pub const PURCHASE_CALLBACK_EVENTS: &[&str] = &["SOL_TRANSFER"];

/// Client for the Shyft callback API
pub struct ShyftClient {
    api_key: String,
    network: Network,
    api_base_url: String,
    client: Client,
}

impl ShyftClient {
    pub fn new(api_key: impl Into<String>, network: Network) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key: api_key.into(),
            network,
            api_base_url: SHYFT_API_BASE.to_string(),
            client,
        }
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Register a callback for transactions touching `addresses`. Shyft
    /// will POST matching transactions to `callback_url` with the
    /// returned callback id in the `callback-id` header.
    #[instrument(skip(self, addresses))]
    pub async fn register_callback(
        &self,
        addresses: &[String],
        callback_url: &str,
        events: &[&str],
    ) -> BlinkResult<String> {
        let url = format!("{}/sol/v1/callback/create", self.api_base_url);
        let request = CreateCallbackRequest {
            network: self.network.as_str(),
            addresses,
            callback_url,
            events,
        };

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| BlinkError::upstream("shyft", e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BlinkError::upstream("shyft", e))?;

        if !status.is_success() {
            error!("Shyft API error: status={}, body={}", status, body);
            if let Ok(parsed) = serde_json::from_str::<ShyftErrorResponse>(&body) {
                return Err(BlinkError::Upstream {
                    service: "shyft".to_string(),
                    detail: parsed.message,
                });
            }
            return Err(BlinkError::Upstream {
                service: "shyft".to_string(),
                detail: format!("HTTP {}: {}", status, body),
            });
        }

        let parsed: CreateCallbackResponse = serde_json::from_str(&body).map_err(|e| {
            BlinkError::Serialization(format!("Failed to parse Shyft response: {}", e))
        })?;
        if !parsed.success {
            return Err(BlinkError::Upstream {
                service: "shyft".to_string(),
                detail: "callback registration reported failure".to_string(),
            });
        }

        info!("Registered Shyft callback: id={}", parsed.result.id);
        Ok(parsed.result.id)
    }
}

#[derive(Debug, Serialize)]
struct CreateCallbackRequest<'a> {
    network: &'a str,
    addresses: &'a [String],
    callback_url: &'a str,
    events: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
struct CreateCallbackResponse {
    success: bool,
    result: CallbackCreated,
}

#[derive(Debug, Deserialize)]
struct CallbackCreated {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ShyftErrorResponse {
    message: String,
}
