//! # Request Handlers
//!
//! Axum request handlers for the blink surface: item detail, purchase
//! initiation, and the payment confirmation callback. Handlers stay
//! thin; every chain or routing effect goes through the capabilities
//! injected in [`AppState`].

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use blink_core::{
    ActionError, ActionLinks, ActionParameter, Blink, BlinkError, BlinkResult, CollectionAsset,
    LinkedAction, OrderData, ProductListing, PurchaseRequest, TransactionCallback,
    LAMPORTS_PER_SOL, PURCHASE_PRICE_LAMPORTS,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Query parameters for purchase initiation.
///
/// Everything is optional at the extractor so a hole answers with the
/// contract's own missing-parameters message instead of an axum
/// rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseQuery {
    #[serde(default)]
    pub clickcrate_id: Option<String>,
    #[serde(default)]
    pub buyer_name: Option<String>,
    #[serde(default)]
    pub shipping_email: Option<String>,
    #[serde(default)]
    pub shipping_phone: Option<String>,
    #[serde(default)]
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub shipping_city: Option<String>,
    #[serde(default)]
    pub shipping_state_province: Option<String>,
    #[serde(default)]
    pub shipping_country_region: Option<String>,
    #[serde(default)]
    pub shipping_zip_code: Option<String>,
}

impl PurchaseQuery {
    /// Collapse into a request. Absent fields become empty strings and
    /// fail the presence check with the same message an explicit empty
    /// value would.
    fn into_request(self, account: String) -> PurchaseRequest {
        PurchaseRequest {
            account,
            clickcrate_id: self.clickcrate_id.unwrap_or_default(),
            buyer_name: self.buyer_name.unwrap_or_default(),
            shipping_email: self.shipping_email.unwrap_or_default(),
            shipping_phone: self.shipping_phone,
            shipping_address: self.shipping_address.unwrap_or_default(),
            shipping_city: self.shipping_city.unwrap_or_default(),
            shipping_state_province: self.shipping_state_province.unwrap_or_default(),
            shipping_country_region: self.shipping_country_region.unwrap_or_default(),
            shipping_zip_code: self.shipping_zip_code.unwrap_or_default(),
        }
    }
}

/// Body of a purchase initiation POST (sent by the wallet)
#[derive(Debug, Default, Deserialize)]
pub struct PurchaseBody {
    /// Paying account public key
    #[serde(default)]
    pub account: Option<String>,
}

/// Purchase initiation response
#[derive(Debug, Serialize)]
pub struct PurchaseResponse {
    /// Base64-encoded JSON of the unsigned payment transaction
    pub transaction: String,
    /// Status text shown by the wallet
    pub message: String,
}

/// Payment confirmation response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackResponse {
    pub message: String,
    /// Signature of the broadcast settlement transaction
    pub devnet_tx_id: String,
}

fn blink_error_to_response(err: BlinkError) -> (StatusCode, Json<ActionError>) {
    let code = err.status_code();
    // Full detail stays server-side; clients get the contract message
    error!("Blink request failed: {}", err);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST),
        Json(ActionError::new(err.client_message())),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "clickcrate-blinks",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Fallback for unmatched routes, kept as JSON for wallet clients
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ActionError::new("Not Found")))
}

/// Serve the purchasable-item blink for a ClickCrate
#[instrument(skip(state))]
pub async fn get_blink(
    State(state): State<AppState>,
    Path(clickcrate_id): Path<String>,
) -> Result<Json<Blink>, (StatusCode, Json<ActionError>)> {
    build_blink(&state, &clickcrate_id)
        .await
        .map(Json)
        .map_err(blink_error_to_response)
}

/// Initiate a purchase: validate the assembled request, build the payment
/// transaction and register the pending purchase
#[instrument(skip(state, query, body))]
pub async fn create_purchase(
    State(state): State<AppState>,
    Query(query): Query<PurchaseQuery>,
    body: Bytes,
) -> Result<Json<PurchaseResponse>, (StatusCode, Json<ActionError>)> {
    process_purchase(&state, query, &body)
        .await
        .map(Json)
        .map_err(blink_error_to_response)
}

/// Confirm a settled payment: verify the transfer, settle the purchase on
/// chain and route the order
#[instrument(skip(state, headers, body))]
pub async fn handle_callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CallbackResponse>, (StatusCode, Json<ActionError>)> {
    process_callback(&state, &headers, &body)
        .await
        .map(Json)
        .map_err(blink_error_to_response)
}

// =============================================================================
// Flow internals (directly testable)
// =============================================================================

async fn build_blink(state: &AppState, clickcrate_id: &str) -> BlinkResult<Blink> {
    if clickcrate_id.trim().is_empty() {
        return Err(BlinkError::ClickCrateNotFound);
    }

    let crate_state = state
        .items
        .fetch_clickcrate(clickcrate_id)
        .await?
        .ok_or_else(|| BlinkError::ProductNotFound {
            clickcrate_id: clickcrate_id.to_string(),
        })?;

    let product_id = crate_state
        .product
        .ok_or_else(|| BlinkError::ProductNotFound {
            clickcrate_id: clickcrate_id.to_string(),
        })?;

    let asset = state
        .items
        .fetch_collection_asset(&product_id)
        .await?
        .ok_or(BlinkError::ProductInfoNotFound)?;
    let listing = state
        .items
        .fetch_product_listing(&product_id)
        .await?
        .ok_or(BlinkError::ProductInfoNotFound)?;

    let blink = assemble_blink(clickcrate_id, &asset, &listing);
    blink.validate()?;
    Ok(blink)
}

/// Shape the item payload: purchase href template with the buyer and
/// shipping parameters, stock summary, and the fixed order notices
fn assemble_blink(clickcrate_id: &str, asset: &CollectionAsset, listing: &ProductListing) -> Blink {
    let href = format!(
        "/blinks/purchase?clickcrateId={}&buyerName={{buyerName}}&shippingEmail={{shippingEmail}}&shippingAddress={{shippingAddress}}&shippingCity={{shippingCity}}&shippingStateProvince={{shippingStateProvince}}&shippingCountryRegion={{shippingCountryRegion}}&shippingZipCode={{shippingZipCode}}",
        clickcrate_id
    );

    let description = format!(
        "IN STOCK: {} | SIZE: {} | DELIVERY: {} \
        \nPRODUCT DESCRIPTION: {} \
        \nORDER INFO: Order confirmations and updates will be sent to your provided email address. To avoid delays ensure all provided information is correct. \
        \nNOTICE: All sales are FINAL and NON-REFUNDABLE! Please email support@example.com if you have an order issue",
        listing.in_stock, listing.size, listing.delivery_estimate, asset.description
    );

    Blink {
        icon: asset.image.clone(),
        label: "Purchase Product".to_string(),
        title: asset.name.clone(),
        description,
        disabled: listing.is_sold_out(),
        links: ActionLinks {
            actions: vec![LinkedAction {
                href,
                label: format!("Buy for {} SOL", listing.price_sol()),
                parameters: vec![
                    ActionParameter::required("buyerName", "First & Last name"),
                    ActionParameter::required("shippingEmail", "Email"),
                    ActionParameter::required(
                        "shippingAddress",
                        "Address (including Apt., Suite, etc.)",
                    ),
                    ActionParameter::required("shippingCity", "City"),
                    ActionParameter::required("shippingStateProvince", "State/Province"),
                    ActionParameter::required("shippingCountryRegion", "Country/Region"),
                    ActionParameter::required("shippingZipCode", "ZIP code"),
                ],
            }],
        },
    }
}

async fn process_purchase(
    state: &AppState,
    query: PurchaseQuery,
    body: &[u8],
) -> BlinkResult<PurchaseResponse> {
    // Lenient body parse: a missing or malformed body is just a missing
    // account parameter
    let account = serde_json::from_slice::<PurchaseBody>(body)
        .ok()
        .and_then(|b| b.account)
        .unwrap_or_default();

    let request = query.into_request(account);
    request.validate()?;

    let payment = state
        .payments
        .create_payment_transaction(
            PURCHASE_PRICE_LAMPORTS,
            &request.account,
            &state.config.server_wallet,
        )
        .await?;

    let callback_id = state
        .payments
        .register_callback(&request, PURCHASE_PRICE_LAMPORTS)
        .await?;
    info!(callback_id, "registered pending purchase");

    Ok(PurchaseResponse {
        transaction: payment.to_base64_json()?,
        message: format!(
            "Purchase successful! \n Order confirmation emailed to: {}",
            request.shipping_email
        ),
    })
}

async fn process_callback(
    state: &AppState,
    headers: &HeaderMap,
    body: &[u8],
) -> BlinkResult<CallbackResponse> {
    let callback_id = headers
        .get("callback-id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or(BlinkError::MissingCallbackId)?;

    let callback: TransactionCallback = serde_json::from_slice(body)
        .map_err(|e| BlinkError::InvalidPayload(format!("callback payload: {}", e)))?;
    info!(signature = %callback.signature, callback_id, "payment confirmation received");

    let details = state
        .payments
        .purchase_details(callback_id)
        .await?
        .ok_or_else(|| BlinkError::PurchaseDetailsNotFound {
            callback_id: callback_id.to_string(),
        })?;

    let settlement_wallet = state.config.server_wallet.trim();
    if settlement_wallet.is_empty() {
        return Err(BlinkError::BuyerUnverified);
    }

    let verified = state
        .payments
        .verify_transaction(&callback, details.price_lamports, settlement_wallet)
        .await?;
    if !verified {
        return Err(BlinkError::InvalidTransaction(format!(
            "transfer does not match expected payment for callback {}",
            callback_id
        )));
    }

    let settlement = state
        .payments
        .make_purchase(&details, settlement_wallet)
        .await?
        .ok_or_else(|| BlinkError::upstream("solana", "make purchase produced no transaction"))?;

    let signature = state.payments.sign_and_send(settlement).await?;
    info!(%signature, "settlement transaction broadcast");

    let order = OrderData {
        product_id: details.product_id.clone(),
        product_name: details.product_name.clone(),
        buyer_id: details.buyer.clone(),
        seller_id: details.seller.clone(),
        quantity: details.quantity,
        total_price: details.price_lamports as f64 / LAMPORTS_PER_SOL as f64,
        order_manager: details.order_manager,
        shipping: details.shipping.clone(),
    };
    let routed = state.orders.route_order(order, &details.seller).await?;
    info!(order_id = %routed.id, status = ?routed.status, "order routed & placed");

    Ok(CallbackResponse {
        message: "Purchase made! Order routed & placed".to_string(),
        devnet_tx_id: signature,
    })
}
