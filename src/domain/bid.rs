//! Offers against auction listings.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::store::Record;
use super::{BidId, ListingId, UserId};
use crate::error::NexusError;

/// An accepted bid. Immutable once recorded.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Bid {
    /// Store-assigned identifier.
    pub id: BidId,
    /// Auction the bid was placed on.
    pub listing_id: ListingId,
    /// Bidding user.
    pub bidder_id: UserId,
    /// Offered amount.
    #[schema(value_type = String)]
    pub amount: Decimal,
    /// Acceptance time.
    pub bid_time: DateTime<Utc>,
}

impl Record for Bid {
    type Id = BidId;

    fn id(&self) -> BidId {
        self.id
    }

    fn not_found(id: BidId) -> NexusError {
        NexusError::BidNotFound(id)
    }
}
