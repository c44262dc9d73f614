//! Marketplace DTOs: listing, bidding and buying.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::PaginationMeta;
use crate::domain::{ListingId, ListingType, ListingView, TicketId, UserId};

/// Request body for `POST /marketplace/list`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateListingRequest {
    /// Ticket to put up for resale.
    pub ticket_id: TicketId,
    /// Seller; must own the ticket.
    pub seller_id: UserId,
    /// Asking price, or the auction floor.
    #[schema(value_type = String, example = "1.5")]
    pub price: Decimal,
    /// `"fixed"` or `"auction"`.
    pub listing_type: ListingType,
    /// Auction close. Required for auctions, ignored otherwise.
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
}

/// Request body for `POST /marketplace/bid`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PlaceBidRequest {
    /// Auction listing.
    pub listing_id: ListingId,
    /// Bidder.
    pub bidder_id: UserId,
    /// Offered amount.
    #[schema(value_type = String, example = "2.0")]
    pub amount: Decimal,
}

/// Request body for `POST /marketplace/buy/{id}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BuyListingRequest {
    /// New owner of the ticket.
    pub buyer_id: UserId,
}

/// Paginated response for `GET /marketplace`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ListingListResponse {
    /// Active listings on this page, in id order.
    pub data: Vec<ListingView>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}
