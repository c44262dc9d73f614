//! Admission tickets: ownership, usage and resale flags.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::listing::ListingType;
use super::store::Record;
use super::{EventId, TicketId, UserId};
use crate::error::NexusError;

/// One admission unit, minted against an [`super::Event`].
///
/// `is_used` only ever moves from `false` to `true`, and `used_date` is
/// stamped in the same step. `is_for_sale` mirrors the existence of an
/// active [`super::MarketListing`] for this ticket.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Ticket {
    /// Store-assigned identifier.
    pub id: TicketId,
    /// Owning event (immutable).
    pub event_id: EventId,
    /// Current owner.
    pub user_id: UserId,
    /// Seat label chosen at purchase.
    pub seat_number: String,
    /// Unique mint identifier.
    pub token_id: String,
    /// Unique verification payload encoded in the QR code.
    pub qr_code_data: String,
    /// When the ticket was minted.
    pub purchase_date: DateTime<Utc>,
    /// Whether the ticket has been checked in.
    pub is_used: bool,
    /// Check-in time, set together with `is_used`.
    pub used_date: Option<DateTime<Utc>>,
    /// Whether an active listing references this ticket.
    pub is_for_sale: bool,
    /// Asking price of the active listing.
    #[schema(value_type = Option<String>)]
    pub sale_price: Option<Decimal>,
    /// Type of the active listing.
    pub sale_type: Option<ListingType>,
    /// End of the active auction, if any.
    pub auction_end_date: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Builds a freshly minted, unused, unlisted ticket.
    #[must_use]
    pub fn minted(
        id: TicketId,
        event_id: EventId,
        user_id: UserId,
        seat_number: String,
        token_id: String,
        qr_code_data: String,
    ) -> Self {
        Self {
            id,
            event_id,
            user_id,
            seat_number,
            token_id,
            qr_code_data,
            purchase_date: Utc::now(),
            is_used: false,
            used_date: None,
            is_for_sale: false,
            sale_price: None,
            sale_type: None,
            auction_end_date: None,
        }
    }

    /// Marks the ticket as listed.
    pub fn mark_listed(
        &mut self,
        price: Decimal,
        listing_type: ListingType,
        ends_at: Option<DateTime<Utc>>,
    ) {
        self.is_for_sale = true;
        self.sale_price = Some(price);
        self.sale_type = Some(listing_type);
        self.auction_end_date = ends_at;
    }

    /// Clears every resale field.
    pub fn clear_listing(&mut self) {
        self.is_for_sale = false;
        self.sale_price = None;
        self.sale_type = None;
        self.auction_end_date = None;
    }
}

impl Record for Ticket {
    type Id = TicketId;

    fn id(&self) -> TicketId {
        self.id
    }

    fn not_found(id: TicketId) -> NexusError {
        NexusError::TicketNotFound(id)
    }
}

/// A ticket joined with the event it admits to.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TicketWithEvent {
    /// The ticket.
    #[serde(flatten)]
    pub ticket: Ticket,
    /// Its event, absent only on a dangling reference.
    pub event: Option<super::Event>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minted_ticket_is_unused_and_unlisted() {
        let t = Ticket::minted(
            TicketId::new(1),
            EventId::new(1),
            UserId::new(1),
            "A1".to_string(),
            "NFT#1".to_string(),
            "qr".to_string(),
        );
        assert!(!t.is_used);
        assert!(t.used_date.is_none());
        assert!(!t.is_for_sale);
    }

    #[test]
    fn listing_flags_round_trip() {
        let mut t = Ticket::minted(
            TicketId::new(1),
            EventId::new(1),
            UserId::new(1),
            "A1".to_string(),
            "NFT#1".to_string(),
            "qr".to_string(),
        );
        t.mark_listed(Decimal::ONE, ListingType::Auction, Some(Utc::now()));
        assert!(t.is_for_sale);
        assert_eq!(t.sale_type, Some(ListingType::Auction));

        t.clear_listing();
        assert!(!t.is_for_sale);
        assert!(t.sale_price.is_none());
        assert!(t.sale_type.is_none());
        assert!(t.auction_end_date.is_none());
    }
}
