//! Activity events reflecting ticket and marketplace state changes.
//!
//! Every successful mutation emits an [`ActivityEvent`] through the
//! [`super::EventBus`]. Events are broadcast to WebSocket subscribers,
//! which filter them by event id or listing id.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::{BidId, EventId, ListingId, ListingType, TicketId, UserId};

/// Domain event emitted after every state mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum ActivityEvent {
    /// A new event was added to the catalog.
    EventCreated {
        /// Event identifier.
        event_id: EventId,
        /// Event title.
        title: String,
        /// Seating capacity.
        tickets_available: u32,
        /// Creation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A ticket was minted by a primary purchase.
    TicketPurchased {
        /// Event the ticket admits to.
        event_id: EventId,
        /// New ticket.
        ticket_id: TicketId,
        /// Buyer.
        user_id: UserId,
        /// Seat label.
        seat_number: String,
        /// Tickets sold for the event after this purchase.
        tickets_sold: u32,
        /// Purchase timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A ticket was checked in at the venue.
    TicketCheckedIn {
        /// Event the ticket admits to.
        event_id: EventId,
        /// Checked-in ticket.
        ticket_id: TicketId,
        /// Check-in time.
        used_date: DateTime<Utc>,
    },

    /// A ticket was put up for resale.
    ListingCreated {
        /// Event the ticket admits to.
        event_id: EventId,
        /// New listing.
        listing_id: ListingId,
        /// Listed ticket.
        ticket_id: TicketId,
        /// Seller.
        seller_id: UserId,
        /// Asking price or auction floor.
        price: Decimal,
        /// Fixed price or auction.
        listing_type: ListingType,
        /// Auction close, if any.
        ends_at: Option<DateTime<Utc>>,
        /// Creation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A bid was accepted on an auction.
    BidPlaced {
        /// Event the listed ticket admits to, when the ticket still exists.
        event_id: Option<EventId>,
        /// Auction listing.
        listing_id: ListingId,
        /// Recorded bid.
        bid_id: BidId,
        /// Bidder.
        bidder_id: UserId,
        /// Bid amount.
        amount: Decimal,
        /// Acceptance timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A fixed-price listing was bought and removed.
    ListingSold {
        /// Event the ticket admits to.
        event_id: EventId,
        /// Removed listing.
        listing_id: ListingId,
        /// Transferred ticket.
        ticket_id: TicketId,
        /// Previous owner.
        seller_id: UserId,
        /// New owner.
        buyer_id: UserId,
        /// Sale price.
        price: Decimal,
        /// Sale timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A user registered with a username.
    UserRegistered {
        /// New user.
        user_id: UserId,
        /// Chosen username.
        username: String,
        /// Registration timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A wallet connected, creating the user on first contact.
    WalletConnected {
        /// Resolved user.
        user_id: UserId,
        /// Wallet address.
        wallet_address: String,
        /// Whether the user was created by this connect.
        created: bool,
        /// Connect timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl ActivityEvent {
    /// Returns the catalog event this activity relates to, if any.
    #[must_use]
    pub const fn event_id(&self) -> Option<EventId> {
        match self {
            Self::EventCreated { event_id, .. }
            | Self::TicketPurchased { event_id, .. }
            | Self::TicketCheckedIn { event_id, .. }
            | Self::ListingCreated { event_id, .. }
            | Self::ListingSold { event_id, .. } => Some(*event_id),
            Self::BidPlaced { event_id, .. } => *event_id,
            Self::UserRegistered { .. } | Self::WalletConnected { .. } => None,
        }
    }

    /// Returns the marketplace listing this activity relates to, if any.
    #[must_use]
    pub const fn listing_id(&self) -> Option<ListingId> {
        match self {
            Self::ListingCreated { listing_id, .. }
            | Self::BidPlaced { listing_id, .. }
            | Self::ListingSold { listing_id, .. } => Some(*listing_id),
            _ => None,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::EventCreated { .. } => "event_created",
            Self::TicketPurchased { .. } => "ticket_purchased",
            Self::TicketCheckedIn { .. } => "ticket_checked_in",
            Self::ListingCreated { .. } => "listing_created",
            Self::BidPlaced { .. } => "bid_placed",
            Self::ListingSold { .. } => "listing_sold",
            Self::UserRegistered { .. } => "user_registered",
            Self::WalletConnected { .. } => "wallet_connected",
        }
    }
}
