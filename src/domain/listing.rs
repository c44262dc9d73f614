//! Resale listings on the secondary marketplace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::store::Record;
use super::user::UserSummary;
use super::{Event, ListingId, Ticket, TicketId, UserId};
use crate::error::NexusError;

/// How a listed ticket is sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    /// Immediate sale at the asking price.
    Fixed,
    /// Ascending-bid auction with the asking price as floor.
    Auction,
}

impl ListingType {
    /// Returns the wire name (`"fixed"` / `"auction"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Auction => "auction",
        }
    }
}

/// An active resale offer for exactly one ticket.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MarketListing {
    /// Store-assigned identifier.
    pub id: ListingId,
    /// Listed ticket. Unique among active listings.
    pub ticket_id: TicketId,
    /// Owner of the ticket when the listing was created.
    pub seller_id: UserId,
    /// Asking price, or the auction floor.
    #[schema(value_type = String)]
    pub price: Decimal,
    /// Fixed price or auction.
    pub listing_type: ListingType,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Auction close. Always `None` for fixed-price listings.
    pub ends_at: Option<DateTime<Utc>>,
    /// Highest accepted bid.
    #[schema(value_type = Option<String>)]
    pub current_bid: Option<Decimal>,
    /// Author of the highest accepted bid.
    pub current_bidder_id: Option<UserId>,
}

impl MarketListing {
    /// Returns the amount a new bid has to exceed: the current bid, or
    /// the asking price when nothing has been bid yet (whichever is
    /// larger).
    #[must_use]
    pub fn bid_floor(&self) -> Decimal {
        self.current_bid.map_or(self.price, |bid| bid.max(self.price))
    }

    /// Returns `true` when the auction close lies strictly before `now`.
    #[must_use]
    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        self.ends_at.is_some_and(|ends_at| ends_at < now)
    }
}

impl Record for MarketListing {
    type Id = ListingId;

    fn id(&self) -> ListingId {
        self.id
    }

    fn not_found(id: ListingId) -> NexusError {
        NexusError::ListingNotFound(id)
    }
}

/// A listing joined with the display data a marketplace page needs.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListingView {
    /// The listing itself.
    #[serde(flatten)]
    pub listing: MarketListing,
    /// Listed ticket.
    pub ticket: Option<Ticket>,
    /// Event the ticket admits to.
    pub event: Option<Event>,
    /// Public seller profile.
    pub seller: Option<UserSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn listing(price: i64, current_bid: Option<i64>) -> MarketListing {
        MarketListing {
            id: ListingId::new(1),
            ticket_id: TicketId::new(1),
            seller_id: UserId::new(1),
            price: Decimal::new(price, 1),
            listing_type: ListingType::Auction,
            created_at: Utc::now(),
            ends_at: None,
            current_bid: current_bid.map(|b| Decimal::new(b, 1)),
            current_bidder_id: None,
        }
    }

    #[test]
    fn bid_floor_uses_price_without_bids() {
        assert_eq!(listing(10, None).bid_floor(), Decimal::new(10, 1));
    }

    #[test]
    fn bid_floor_uses_higher_of_bid_and_price() {
        assert_eq!(listing(10, Some(15)).bid_floor(), Decimal::new(15, 1));
        assert_eq!(listing(20, Some(15)).bid_floor(), Decimal::new(20, 1));
    }

    #[test]
    fn has_ended_is_strict() {
        let now = Utc::now();
        let mut l = listing(10, None);
        assert!(!l.has_ended(now));

        l.ends_at = Some(now);
        assert!(!l.has_ended(now));

        l.ends_at = Some(now - Duration::seconds(1));
        assert!(l.has_ended(now));
    }

    #[test]
    fn listing_type_wire_names() {
        let json = serde_json::to_string(&ListingType::Auction).ok();
        assert_eq!(json.as_deref(), Some("\"auction\""));
        assert_eq!(ListingType::Fixed.as_str(), "fixed");
    }
}
