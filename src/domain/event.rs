//! Ticketed occasions and their fixed seating capacity.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::EventId;
use super::store::Record;
use crate::error::NexusError;

/// A ticketed occasion with fixed capacity.
///
/// `tickets_sold` is only ever incremented by a successful purchase and
/// never exceeds `tickets_available`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Event {
    /// Store-assigned identifier.
    pub id: EventId,
    /// Headline shown in listings.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Reference to a promotional image.
    pub image_ref: Option<String>,
    /// Venue.
    pub location: String,
    /// When the event takes place.
    pub date: DateTime<Utc>,
    /// Free-form category (e.g. `"Music"`).
    pub category: String,
    /// Primary-sale price per ticket.
    #[schema(value_type = String)]
    pub ticket_price: Decimal,
    /// Total capacity.
    pub tickets_available: u32,
    /// Tickets minted so far.
    pub tickets_sold: u32,
    /// Whether the organiser has been verified.
    pub verified: bool,
}

impl Event {
    /// Returns `true` once every seat has been sold.
    #[must_use]
    pub const fn is_sold_out(&self) -> bool {
        self.tickets_sold >= self.tickets_available
    }

    /// Number of tickets still available for primary sale.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.tickets_available.saturating_sub(self.tickets_sold)
    }
}

impl Record for Event {
    type Id = EventId;

    fn id(&self) -> EventId {
        self.id
    }

    fn not_found(id: EventId) -> NexusError {
        NexusError::EventNotFound(id)
    }
}

/// Fields supplied by an organiser when creating an [`Event`].
#[derive(Debug, Clone)]
pub struct NewEvent {
    /// Headline.
    pub title: String,
    /// Description.
    pub description: String,
    /// Optional image reference.
    pub image_ref: Option<String>,
    /// Venue.
    pub location: String,
    /// Start time.
    pub date: DateTime<Utc>,
    /// Category.
    pub category: String,
    /// Price per ticket, must be non-negative.
    pub ticket_price: Decimal,
    /// Capacity, must be positive.
    pub tickets_available: u32,
}

impl NewEvent {
    /// Checks the organiser-supplied fields.
    ///
    /// # Errors
    ///
    /// Returns [`NexusError::InvalidRequest`] when a required text field
    /// is blank, the price is negative, or the capacity is zero.
    pub fn validate(&self) -> Result<(), NexusError> {
        for (field, value) in [
            ("title", &self.title),
            ("location", &self.location),
            ("category", &self.category),
        ] {
            if value.trim().is_empty() {
                return Err(NexusError::InvalidRequest(format!("{field} must not be empty")));
            }
        }
        if self.ticket_price < Decimal::ZERO {
            return Err(NexusError::InvalidRequest(
                "ticket_price must not be negative".to_string(),
            ));
        }
        if self.tickets_available == 0 {
            return Err(NexusError::InvalidRequest(
                "tickets_available must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the stored record, starting with zero tickets sold.
    #[must_use]
    pub fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            image_ref: self.image_ref,
            location: self.location,
            date: self.date,
            category: self.category,
            ticket_price: self.ticket_price,
            tickets_available: self.tickets_available,
            tickets_sold: 0,
            verified: true,
        }
    }
}
