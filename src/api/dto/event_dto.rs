//! Event catalog DTOs.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::PaginationMeta;
use crate::domain::{Event, NewEvent};

/// Request body for `POST /events`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEventRequest {
    /// Headline.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Optional image reference.
    #[serde(default)]
    pub image_ref: Option<String>,
    /// Venue.
    pub location: String,
    /// Start time (RFC 3339).
    pub date: DateTime<Utc>,
    /// Category, e.g. `"Sports"`.
    pub category: String,
    /// Price per ticket.
    #[schema(value_type = String, example = "1.2")]
    pub ticket_price: Decimal,
    /// Seating capacity.
    pub tickets_available: u32,
}

impl From<CreateEventRequest> for NewEvent {
    fn from(req: CreateEventRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            image_ref: req.image_ref,
            location: req.location,
            date: req.date,
            category: req.category,
            ticket_price: req.ticket_price,
            tickets_available: req.tickets_available,
        }
    }
}

/// Paginated response for `GET /events`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventListResponse {
    /// Events on this page, in id order.
    pub data: Vec<Event>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}
