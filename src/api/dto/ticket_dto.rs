//! Ticket purchase and lookup DTOs.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{EventId, UserId};

/// Request body for `POST /tickets/purchase`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PurchaseTicketRequest {
    /// Event to buy a seat for.
    pub event_id: EventId,
    /// Buyer.
    pub user_id: UserId,
    /// Seat label, e.g. `"B7"`.
    pub seat_number: String,
}
