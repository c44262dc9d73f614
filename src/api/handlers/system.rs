//! System endpoints: health check and marketplace configuration.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::{ListingType, StoreStats};

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
    stats: StoreStats,
    ws_subscribers: usize,
}

/// `GET /health`: Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, current timestamp and record counts.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let stats = state.ticketing.store().stats().await;
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            stats,
            ws_subscribers: state.event_bus.receiver_count(),
        }),
    )
}

/// Marketplace rules exposed to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct MarketplaceConfig {
    max_tickets_per_event: usize,
    listing_types: Vec<ListingType>,
}

/// `GET /config/marketplace`: Purchase cap and supported listing types.
#[utoipa::path(
    get,
    path = "/config/marketplace",
    tag = "System",
    summary = "Marketplace configuration",
    description = "Returns the per-user, per-event purchase cap and the supported listing types.",
    responses(
        (status = 200, description = "Marketplace rules", body = MarketplaceConfig),
    )
)]
pub async fn marketplace_config_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(MarketplaceConfig {
        max_tickets_per_event: state.ticketing.purchase_limit(),
        listing_types: vec![ListingType::Fixed, ListingType::Auction],
    })
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/marketplace", get(marketplace_config_handler))
}
