//! Event catalog handlers: list, create, get.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{CreateEventRequest, EventListResponse, PaginationParams};
use crate::api::extract::{ApiJson, ApiPath};
use crate::app_state::AppState;
use crate::domain::{Event, EventId};
use crate::error::{ErrorResponse, NexusError};

/// `GET /events`: List the catalog with pagination.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    tag = "Events",
    summary = "List events",
    description = "Returns a paginated list of every event in the catalog, in id order.",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated event list", body = EventListResponse),
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> impl IntoResponse {
    let events = state.ticketing.list_events().await;
    let (data, pagination) = params.paginate(events);
    Json(EventListResponse { data, pagination })
}

/// `POST /events`: Add an event to the catalog.
///
/// # Errors
///
/// Returns [`NexusError::InvalidRequest`] on blank fields, a negative
/// price or zero capacity.
#[utoipa::path(
    post,
    path = "/api/v1/events",
    tag = "Events",
    summary = "Create an event",
    description = "Creates an event with zero tickets sold.",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Invalid event fields", body = ErrorResponse),
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateEventRequest>,
) -> Result<impl IntoResponse, NexusError> {
    let event = state.ticketing.create_event(req.into()).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// `GET /events/{id}`: Get one event.
///
/// # Errors
///
/// Returns [`NexusError::EventNotFound`] if the event does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Get event details",
    params(
        ("id" = u64, Path, description = "Event id"),
    ),
    responses(
        (status = 200, description = "Event details", body = Event),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EventId>,
) -> Result<Json<Event>, NexusError> {
    Ok(Json(state.ticketing.get_event(id).await?))
}

/// Event catalog routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/events/{id}", get(get_event))
}
