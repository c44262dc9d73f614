//! Ticket handlers: purchase, lookup, check-in, QR verification.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};

use crate::api::dto::PurchaseTicketRequest;
use crate::api::extract::{ApiJson, ApiPath};
use crate::app_state::AppState;
use crate::domain::{Ticket, TicketId};
use crate::error::{ErrorResponse, NexusError};
use crate::service::Verification;

/// `POST /tickets/purchase`: Buy a seat and mint its ticket.
///
/// # Errors
///
/// Returns [`NexusError::EventNotFound`], [`NexusError::SoldOut`] or
/// [`NexusError::PurchaseLimitExceeded`], checked in that order.
#[utoipa::path(
    post,
    path = "/api/v1/tickets/purchase",
    tag = "Tickets",
    summary = "Purchase a ticket",
    description = "Mints a ticket for the buyer. Fails when the event is sold out or the buyer already holds the per-event maximum.",
    request_body = PurchaseTicketRequest,
    responses(
        (status = 201, description = "Ticket minted", body = Ticket),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 409, description = "Event sold out", body = ErrorResponse),
        (status = 422, description = "Purchase limit reached", body = ErrorResponse),
    )
)]
pub async fn purchase_ticket(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<PurchaseTicketRequest>,
) -> Result<impl IntoResponse, NexusError> {
    let ticket = state
        .ticketing
        .purchase(req.event_id, req.user_id, &req.seat_number)
        .await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// `GET /tickets/{id}`: Get one ticket.
///
/// # Errors
///
/// Returns [`NexusError::TicketNotFound`] if the ticket does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/tickets/{id}",
    tag = "Tickets",
    summary = "Get ticket details",
    params(
        ("id" = u64, Path, description = "Ticket id"),
    ),
    responses(
        (status = 200, description = "Ticket details", body = Ticket),
        (status = 404, description = "Ticket not found", body = ErrorResponse),
    )
)]
pub async fn get_ticket(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<TicketId>,
) -> Result<Json<Ticket>, NexusError> {
    Ok(Json(state.ticketing.get_ticket(id).await?))
}

/// `PATCH /tickets/{id}/use`: Check a ticket in at the venue.
///
/// # Errors
///
/// Returns [`NexusError::TicketNotFound`] or [`NexusError::AlreadyUsed`].
#[utoipa::path(
    patch,
    path = "/api/v1/tickets/{id}/use",
    tag = "Tickets",
    summary = "Check in a ticket",
    description = "Marks the ticket as used. A second check-in fails and reports the original check-in time.",
    params(
        ("id" = u64, Path, description = "Ticket id"),
    ),
    responses(
        (status = 200, description = "Ticket checked in", body = Ticket),
        (status = 404, description = "Ticket not found", body = ErrorResponse),
        (status = 409, description = "Ticket already used", body = ErrorResponse),
    )
)]
pub async fn check_in_ticket(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<TicketId>,
) -> Result<Json<Ticket>, NexusError> {
    Ok(Json(state.ticketing.check_in(id).await?))
}

/// `GET /tickets/verify/{qr_code}`: Look up a ticket by its QR payload.
///
/// # Errors
///
/// Returns [`NexusError::InvalidCode`] if no ticket carries the payload.
#[utoipa::path(
    get,
    path = "/api/v1/tickets/verify/{qr_code}",
    tag = "Tickets",
    summary = "Verify a ticket QR code",
    description = "Returns the ticket, its event and whether it can still be used.",
    params(
        ("qr_code" = String, Path, description = "Scanned QR payload (percent-encoded)"),
    ),
    responses(
        (status = 200, description = "Verification result", body = Verification),
        (status = 404, description = "Unknown QR code", body = ErrorResponse),
    )
)]
pub async fn verify_ticket(
    State(state): State<AppState>,
    ApiPath(qr_code): ApiPath<String>,
) -> Result<Json<Verification>, NexusError> {
    Ok(Json(state.ticketing.verify(&qr_code).await?))
}

/// Ticket routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tickets/purchase", post(purchase_ticket))
        .route("/tickets/verify/{qr_code}", get(verify_ticket))
        .route("/tickets/{id}", get(get_ticket))
        .route("/tickets/{id}/use", patch(check_in_ticket))
}
