//! Marketplace service: resale listings, auction bids and fixed-price
//! sales.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{
    ActivityEvent, Bid, EntityStore, EventBus, ListingId, ListingType, ListingView, MarketListing,
    Tables, Ticket, TicketId, UserId, UserSummary,
};
use crate::error::NexusError;

/// Orchestration layer for the secondary market.
///
/// A ticket's `is_for_sale` flag and the existence of its listing are
/// always changed together under the store write guard.
#[derive(Debug, Clone)]
pub struct MarketplaceService {
    store: Arc<EntityStore>,
    event_bus: EventBus,
}

impl MarketplaceService {
    /// Creates a new `MarketplaceService`.
    #[must_use]
    pub fn new(store: Arc<EntityStore>, event_bus: EventBus) -> Self {
        Self { store, event_bus }
    }

    /// Returns every active listing joined with ticket, event and seller
    /// display data.
    pub async fn list_listings(&self) -> Vec<ListingView> {
        let tables = self.store.read().await;
        tables
            .listings
            .list()
            .map(|listing| listing_view(&tables, listing))
            .collect()
    }

    /// Returns one listing with its display data.
    ///
    /// # Errors
    ///
    /// Returns [`NexusError::ListingNotFound`] if the listing does not
    /// exist.
    pub async fn get_listing(&self, listing_id: ListingId) -> Result<ListingView, NexusError> {
        let tables = self.store.read().await;
        let listing = tables.listings.require(listing_id)?;
        Ok(listing_view(&tables, listing))
    }

    /// Returns the bids recorded against a listing, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`NexusError::ListingNotFound`] if the listing does not
    /// exist.
    pub async fn bids_for_listing(&self, listing_id: ListingId) -> Result<Vec<Bid>, NexusError> {
        let tables = self.store.read().await;
        tables.listings.require(listing_id)?;
        Ok(tables.bids_for_listing(listing_id).cloned().collect())
    }

    /// Puts a ticket up for resale.
    ///
    /// Auctions must carry `ends_at`; fixed-price listings ignore it.
    ///
    /// # Errors
    ///
    /// - [`NexusError::InvalidRequest`] for a negative price or an auction
    ///   without `ends_at`.
    /// - [`NexusError::TicketNotFound`] if the ticket does not exist.
    /// - [`NexusError::AlreadyListed`] if the ticket has an active listing.
    /// - [`NexusError::NotOwner`] if `seller_id` does not own the ticket.
    pub async fn create_listing(
        &self,
        ticket_id: TicketId,
        seller_id: UserId,
        price: Decimal,
        listing_type: ListingType,
        ends_at: Option<DateTime<Utc>>,
    ) -> Result<MarketListing, NexusError> {
        if price < Decimal::ZERO {
            return Err(NexusError::InvalidRequest(
                "price must not be negative".to_string(),
            ));
        }
        let ends_at = match listing_type {
            ListingType::Auction => Some(ends_at.ok_or_else(|| {
                NexusError::InvalidRequest("auction listings require ends_at".to_string())
            })?),
            ListingType::Fixed => None,
        };

        let mut tables = self.store.write().await;

        let ticket = tables.tickets.require(ticket_id)?;
        if ticket.is_for_sale || tables.listing_for_ticket(ticket_id).is_some() {
            tracing::debug!(%ticket_id, "listing rejected: already listed");
            return Err(NexusError::AlreadyListed(ticket_id));
        }
        if ticket.user_id != seller_id {
            tracing::debug!(%ticket_id, %seller_id, "listing rejected: not owner");
            return Err(NexusError::NotOwner {
                ticket_id,
                seller_id,
            });
        }
        let event_id = ticket.event_id;

        let listing = tables.listings.create(|id| MarketListing {
            id,
            ticket_id,
            seller_id,
            price,
            listing_type,
            created_at: Utc::now(),
            ends_at,
            current_bid: None,
            current_bidder_id: None,
        });
        tables
            .tickets
            .update(ticket_id, |t| t.mark_listed(price, listing_type, ends_at))?;

        drop(tables);

        let _ = self.event_bus.publish(ActivityEvent::ListingCreated {
            event_id,
            listing_id: listing.id,
            ticket_id,
            seller_id,
            price,
            listing_type,
            ends_at,
            timestamp: listing.created_at,
        });

        tracing::info!(
            listing_id = %listing.id,
            %ticket_id,
            %seller_id,
            %price,
            listing_type = listing_type.as_str(),
            "listing created"
        );
        Ok(listing)
    }

    /// Places a bid on an auction listing.
    ///
    /// The bid must strictly exceed the current bid, or the asking price
    /// when no bid has been accepted yet.
    ///
    /// # Errors
    ///
    /// - [`NexusError::InvalidRequest`] for a non-positive amount.
    /// - [`NexusError::ListingNotFound`] if the listing does not exist.
    /// - [`NexusError::NotAnAuction`] for fixed-price listings.
    /// - [`NexusError::AuctionEnded`] once `ends_at` has passed.
    /// - [`NexusError::BidTooLow`] if the amount does not beat the floor.
    pub async fn place_bid(
        &self,
        listing_id: ListingId,
        bidder_id: UserId,
        amount: Decimal,
    ) -> Result<Bid, NexusError> {
        if amount <= Decimal::ZERO {
            return Err(NexusError::InvalidRequest(
                "bid amount must be positive".to_string(),
            ));
        }

        let mut tables = self.store.write().await;
        let now = Utc::now();

        let listing = tables.listings.require(listing_id)?;
        if listing.listing_type != ListingType::Auction {
            return Err(NexusError::NotAnAuction(listing_id));
        }
        if let Some(ends_at) = listing.ends_at
            && listing.has_ended(now)
        {
            tracing::debug!(%listing_id, %bidder_id, "bid rejected: auction ended");
            return Err(NexusError::AuctionEnded {
                listing_id,
                ends_at,
            });
        }
        let floor = listing.bid_floor();
        if amount <= floor {
            tracing::debug!(%listing_id, %bidder_id, %amount, %floor, "bid rejected: too low");
            return Err(NexusError::BidTooLow {
                current_bid: listing.current_bid,
                minimum_exclusive: floor,
            });
        }
        let event_id = tables.tickets.get(listing.ticket_id).map(|t| t.event_id);

        let bid = tables.bids.create(|id| Bid {
            id,
            listing_id,
            bidder_id,
            amount,
            bid_time: now,
        });
        tables.listings.update(listing_id, |l| {
            if l.current_bid.is_none_or(|current| amount > current) {
                l.current_bid = Some(amount);
                l.current_bidder_id = Some(bidder_id);
            }
        })?;

        drop(tables);

        let _ = self.event_bus.publish(ActivityEvent::BidPlaced {
            event_id,
            listing_id,
            bid_id: bid.id,
            bidder_id,
            amount,
            timestamp: now,
        });

        tracing::info!(bid_id = %bid.id, %listing_id, %bidder_id, %amount, "bid placed");
        Ok(bid)
    }

    /// Buys a fixed-price listing: transfers the ticket to `buyer_id`,
    /// clears its sale fields and removes the listing in one step.
    ///
    /// # Errors
    ///
    /// - [`NexusError::ListingNotFound`] if the listing does not exist.
    /// - [`NexusError::NotFixedPrice`] for auction listings.
    /// - [`NexusError::TicketNotFound`] if the listed ticket is missing.
    pub async fn buy_fixed(
        &self,
        listing_id: ListingId,
        buyer_id: UserId,
    ) -> Result<Ticket, NexusError> {
        let mut tables = self.store.write().await;

        let listing = tables.listings.require(listing_id)?;
        if listing.listing_type != ListingType::Fixed {
            return Err(NexusError::NotFixedPrice(listing_id));
        }
        let (ticket_id, seller_id, price) = (listing.ticket_id, listing.seller_id, listing.price);
        tables.tickets.require(ticket_id)?;

        let ticket = tables.tickets.update(ticket_id, |t| {
            t.user_id = buyer_id;
            t.clear_listing();
        })?;
        tables.listings.delete(listing_id);

        drop(tables);

        let _ = self.event_bus.publish(ActivityEvent::ListingSold {
            event_id: ticket.event_id,
            listing_id,
            ticket_id,
            seller_id,
            buyer_id,
            price,
            timestamp: Utc::now(),
        });

        tracing::info!(%listing_id, %ticket_id, %seller_id, %buyer_id, %price, "listing sold");
        Ok(ticket)
    }
}

/// Joins a listing with its ticket, event and seller.
fn listing_view(tables: &Tables, listing: &MarketListing) -> ListingView {
    let ticket = tables.tickets.get(listing.ticket_id).cloned();
    let event = ticket
        .as_ref()
        .and_then(|t| tables.events.get(t.event_id))
        .cloned();
    let seller = tables.users.get(listing.seller_id).map(UserSummary::from);
    ListingView {
        listing: listing.clone(),
        ticket,
        event,
        seller,
    }
}
