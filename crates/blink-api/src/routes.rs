//! # Routes
//!
//! Axum router configuration for the blink API. Every response carries
//! the Actions protocol headers so wallets accept the endpoints, and
//! CORS is wide open because blinks are fetched from arbitrary origins.

use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

/// Version of the Actions wire contract the endpoints speak
pub const ACTION_VERSION: &str = "2.1.3";

/// CAIP-2 id of the chain the blinks settle on (Solana devnet)
pub const BLOCKCHAIN_IDS: &str = "solana:EtWTRABZaYq6iMfeYKouRu166VU2xqa1";

/// Create the main application router
///
/// Routes:
/// - Blinks:
///   - GET  /blinks/{clickcrate_id} - Purchasable-item blink
///   - POST /blinks/purchase - Build the payment transaction
///   - POST /blinks/callback/purchase - Payment confirmation callback
///
/// - Health:
///   - GET /health - Health check
///   - GET / - Health check
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::CONTENT_ENCODING,
            header::ACCEPT_ENCODING,
        ]);

    // Fixed segments registered before the item capture
    let blink_routes = Router::new()
        .route("/purchase", post(handlers::create_purchase))
        .route("/callback/purchase", post(handlers::handle_callback))
        .route("/{clickcrate_id}", get(handlers::get_blink));

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        // Blink surface
        .nest("/blinks", blink_routes)
        // Unknown paths still answer JSON
        .fallback(handlers::not_found)
        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-action-version"),
                    HeaderValue::from_static(ACTION_VERSION),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-blockchain-ids"),
                    HeaderValue::from_static(BLOCKCHAIN_IDS),
                )),
        )
        // State
        .with_state(state)
}
