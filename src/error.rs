//! Error types with HTTP status code mapping.
//!
//! [`NexusError`] is the central error type. Each variant belongs to one
//! [`ErrorKind`], carries a stable numeric code, and maps to an HTTP
//! status and a structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{BidId, EventId, ListingId, TicketId, UserId};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 5003,
///     "kind": "state_mismatch",
///     "message": "bid must be higher than 1.5",
///     "details": { "current_bid": "1.5", "minimum_exclusive": "1.5" }
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code, kind and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Machine-readable error category.
    pub kind: ErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Context needed to render a precise message.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

/// Machine-readable error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A referenced event, ticket, listing, user or code is absent.
    NotFound,
    /// The event is sold out.
    CapacityExceeded,
    /// The per-user purchase cap is reached.
    LimitExceeded,
    /// The request collides with current ownership or usage state.
    Conflict,
    /// The request is malformed.
    InvalidInput,
    /// The listing is in the wrong state for the operation.
    StateMismatch,
    /// Unexpected server-side failure.
    Internal,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category                      | HTTP Status             |
/// |-----------|-------------------------------|-------------------------|
/// | 1000–1999 | Validation                    | 400 Bad Request         |
/// | 2000–2999 | Not Found                     | 404 Not Found           |
/// | 3000–3999 | Server                        | 500 Internal Error      |
/// | 4000–4999 | Ticketing rules / conflicts   | 403 / 409 / 422         |
/// | 5000–5999 | Marketplace state             | 422 Unprocessable       |
#[derive(Debug, thiserror::Error)]
pub enum NexusError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Event with the given id does not exist.
    #[error("event not found: {0}")]
    EventNotFound(EventId),

    /// Ticket with the given id does not exist.
    #[error("ticket not found: {0}")]
    TicketNotFound(TicketId),

    /// Listing with the given id does not exist.
    #[error("listing not found: {0}")]
    ListingNotFound(ListingId),

    /// User with the given id does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// Bid with the given id does not exist.
    #[error("bid not found: {0}")]
    BidNotFound(BidId),

    /// No ticket carries the scanned QR payload.
    #[error("invalid ticket QR code")]
    InvalidCode,

    /// Every seat of the event has been sold.
    #[error("no tickets available for event {event_id}")]
    SoldOut {
        /// Sold-out event.
        event_id: EventId,
        /// Capacity of the event.
        tickets_available: u32,
    },

    /// The buyer already holds the maximum number of tickets.
    #[error("maximum ticket purchase limit reached ({limit} tickets per event)")]
    PurchaseLimitExceeded {
        /// Configured per-user cap.
        limit: usize,
    },

    /// The ticket already has an active listing.
    #[error("ticket {0} is already listed for sale")]
    AlreadyListed(TicketId),

    /// The seller does not own the ticket.
    #[error("user {seller_id} does not own ticket {ticket_id}")]
    NotOwner {
        /// Ticket being listed.
        ticket_id: TicketId,
        /// Claimed seller.
        seller_id: UserId,
    },

    /// The ticket has already been checked in.
    #[error("ticket {ticket_id} has already been used")]
    AlreadyUsed {
        /// Checked-in ticket.
        ticket_id: TicketId,
        /// Original check-in time.
        used_date: Option<DateTime<Utc>>,
    },

    /// Username already registered.
    #[error("username already taken: {0}")]
    UsernameTaken(String),

    /// Wallet address already linked to another user.
    #[error("wallet address already linked: {0}")]
    WalletTaken(String),

    /// Bid placed on a fixed-price listing.
    #[error("listing {0} is not an auction")]
    NotAnAuction(ListingId),

    /// Direct purchase attempted on an auction.
    #[error("listing {0} is not a fixed price sale")]
    NotFixedPrice(ListingId),

    /// The auction closed before the bid arrived.
    #[error("auction {listing_id} has ended")]
    AuctionEnded {
        /// Closed auction.
        listing_id: ListingId,
        /// Close time.
        ends_at: DateTime<Utc>,
    },

    /// The bid does not exceed the current bid (or the floor price).
    #[error("bid must be higher than {minimum_exclusive}")]
    BidTooLow {
        /// Highest accepted bid so far.
        current_bid: Option<Decimal>,
        /// Amount the bid had to exceed.
        minimum_exclusive: Decimal,
    },

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl NexusError {
    /// Returns the error category for this variant.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRequest(_) => ErrorKind::InvalidInput,
            Self::EventNotFound(_)
            | Self::TicketNotFound(_)
            | Self::ListingNotFound(_)
            | Self::UserNotFound(_)
            | Self::BidNotFound(_)
            | Self::InvalidCode => ErrorKind::NotFound,
            Self::SoldOut { .. } => ErrorKind::CapacityExceeded,
            Self::PurchaseLimitExceeded { .. } => ErrorKind::LimitExceeded,
            Self::AlreadyListed(_)
            | Self::NotOwner { .. }
            | Self::AlreadyUsed { .. }
            | Self::UsernameTaken(_)
            | Self::WalletTaken(_) => ErrorKind::Conflict,
            Self::NotAnAuction(_)
            | Self::NotFixedPrice(_)
            | Self::AuctionEnded { .. }
            | Self::BidTooLow { .. } => ErrorKind::StateMismatch,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::EventNotFound(_) => 2001,
            Self::TicketNotFound(_) => 2002,
            Self::ListingNotFound(_) => 2003,
            Self::UserNotFound(_) => 2004,
            Self::BidNotFound(_) => 2005,
            Self::InvalidCode => 2006,
            Self::Internal(_) => 3000,
            Self::SoldOut { .. } => 4001,
            Self::PurchaseLimitExceeded { .. } => 4002,
            Self::AlreadyUsed { .. } => 4003,
            Self::AlreadyListed(_) => 4004,
            Self::NotOwner { .. } => 4005,
            Self::UsernameTaken(_) => 4006,
            Self::WalletTaken(_) => 4007,
            Self::NotAnAuction(_) => 5001,
            Self::NotFixedPrice(_) => 5002,
            Self::BidTooLow { .. } => 5003,
            Self::AuctionEnded { .. } => 5004,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotOwner { .. } => StatusCode::FORBIDDEN,
            _ => match self.kind() {
                ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::CapacityExceeded | ErrorKind::Conflict => StatusCode::CONFLICT,
                ErrorKind::LimitExceeded | ErrorKind::StateMismatch => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Returns the structured context attached to this variant, if any.
    #[must_use]
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::SoldOut {
                tickets_available, ..
            } => Some(serde_json::json!({ "tickets_available": tickets_available })),
            Self::PurchaseLimitExceeded { limit } => Some(serde_json::json!({ "limit": limit })),
            Self::AlreadyUsed { used_date, .. } => {
                Some(serde_json::json!({ "used_date": used_date }))
            }
            Self::AuctionEnded { ends_at, .. } => Some(serde_json::json!({ "ends_at": ends_at })),
            Self::BidTooLow {
                current_bid,
                minimum_exclusive,
            } => Some(serde_json::json!({
                "current_bid": current_bid,
                "minimum_exclusive": minimum_exclusive,
            })),
            _ => None,
        }
    }
}

impl IntoResponse for NexusError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                kind: self.kind(),
                message: self.to_string(),
                details: self.details(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(
            NexusError::EventNotFound(EventId::new(1)).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            NexusError::SoldOut {
                event_id: EventId::new(1),
                tickets_available: 1
            }
            .kind(),
            ErrorKind::CapacityExceeded
        );
        assert_eq!(
            NexusError::PurchaseLimitExceeded { limit: 5 }.kind(),
            ErrorKind::LimitExceeded
        );
        assert_eq!(
            NexusError::AlreadyListed(TicketId::new(1)).kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            NexusError::NotAnAuction(ListingId::new(1)).kind(),
            ErrorKind::StateMismatch
        );
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            NexusError::InvalidRequest(String::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            NexusError::NotOwner {
                ticket_id: TicketId::new(1),
                seller_id: UserId::new(2)
            }
            .status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            NexusError::AlreadyUsed {
                ticket_id: TicketId::new(1),
                used_date: None
            }
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            NexusError::Internal(String::new()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn bid_too_low_carries_current_bid() {
        let err = NexusError::BidTooLow {
            current_bid: Some(Decimal::new(15, 1)),
            minimum_exclusive: Decimal::new(15, 1),
        };
        let details = err.details().unwrap_or_default();
        assert_eq!(details["current_bid"], "1.5");
        assert_eq!(err.to_string(), "bid must be higher than 1.5");
    }

    #[test]
    fn limit_message_names_cap() {
        let err = NexusError::PurchaseLimitExceeded { limit: 5 };
        assert!(err.to_string().contains("5 tickets per event"));
    }
}
