//! Marketplace handlers: browse, list, bid, buy.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    BuyListingRequest, CreateListingRequest, ListingListResponse, PaginationParams,
    PlaceBidRequest,
};
use crate::api::extract::{ApiJson, ApiPath};
use crate::app_state::AppState;
use crate::domain::{Bid, ListingId, ListingView, MarketListing, Ticket};
use crate::error::{ErrorResponse, NexusError};

/// `GET /marketplace`: Browse active listings with display data.
#[utoipa::path(
    get,
    path = "/api/v1/marketplace",
    tag = "Marketplace",
    summary = "List active listings",
    description = "Returns a paginated list of active listings joined with their ticket, event and seller.",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated listing list", body = ListingListResponse),
    )
)]
pub async fn list_marketplace(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> impl IntoResponse {
    let listings = state.marketplace.list_listings().await;
    let (data, pagination) = params.paginate(listings);
    Json(ListingListResponse { data, pagination })
}

/// `GET /marketplace/{id}`: Get one listing.
///
/// # Errors
///
/// Returns [`NexusError::ListingNotFound`] if the listing does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/marketplace/{id}",
    tag = "Marketplace",
    summary = "Get listing details",
    params(
        ("id" = u64, Path, description = "Listing id"),
    ),
    responses(
        (status = 200, description = "Listing with display data", body = ListingView),
        (status = 404, description = "Listing not found", body = ErrorResponse),
    )
)]
pub async fn get_listing(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ListingId>,
) -> Result<Json<ListingView>, NexusError> {
    Ok(Json(state.marketplace.get_listing(id).await?))
}

/// `GET /marketplace/{id}/bids`: Bid history of a listing.
///
/// # Errors
///
/// Returns [`NexusError::ListingNotFound`] if the listing does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/marketplace/{id}/bids",
    tag = "Marketplace",
    summary = "List bids on a listing",
    params(
        ("id" = u64, Path, description = "Listing id"),
    ),
    responses(
        (status = 200, description = "Bids, oldest first", body = Vec<Bid>),
        (status = 404, description = "Listing not found", body = ErrorResponse),
    )
)]
pub async fn list_bids(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ListingId>,
) -> Result<Json<Vec<Bid>>, NexusError> {
    Ok(Json(state.marketplace.bids_for_listing(id).await?))
}

/// `POST /marketplace/list`: Put a ticket up for resale.
///
/// # Errors
///
/// Returns [`NexusError::TicketNotFound`], [`NexusError::AlreadyListed`]
/// or [`NexusError::NotOwner`], or [`NexusError::InvalidRequest`] for a
/// negative price or an auction without `ends_at`.
#[utoipa::path(
    post,
    path = "/api/v1/marketplace/list",
    tag = "Marketplace",
    summary = "Create a listing",
    description = "Lists a ticket at a fixed price or as an auction. Auctions must carry `ends_at`.",
    request_body = CreateListingRequest,
    responses(
        (status = 201, description = "Listing created", body = MarketListing),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 403, description = "Seller does not own the ticket", body = ErrorResponse),
        (status = 404, description = "Ticket not found", body = ErrorResponse),
        (status = 409, description = "Ticket already listed", body = ErrorResponse),
    )
)]
pub async fn create_listing(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateListingRequest>,
) -> Result<impl IntoResponse, NexusError> {
    let listing = state
        .marketplace
        .create_listing(
            req.ticket_id,
            req.seller_id,
            req.price,
            req.listing_type,
            req.ends_at,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(listing)))
}

/// `POST /marketplace/bid`: Bid on an auction.
///
/// # Errors
///
/// Returns [`NexusError::ListingNotFound`], [`NexusError::NotAnAuction`],
/// [`NexusError::AuctionEnded`] or [`NexusError::BidTooLow`].
#[utoipa::path(
    post,
    path = "/api/v1/marketplace/bid",
    tag = "Marketplace",
    summary = "Place a bid",
    description = "Records a bid that strictly exceeds the current bid, or the asking price when there is none.",
    request_body = PlaceBidRequest,
    responses(
        (status = 201, description = "Bid accepted", body = Bid),
        (status = 400, description = "Invalid amount", body = ErrorResponse),
        (status = 404, description = "Listing not found", body = ErrorResponse),
        (status = 422, description = "Not an auction, auction ended or bid too low", body = ErrorResponse),
    )
)]
pub async fn place_bid(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<PlaceBidRequest>,
) -> Result<impl IntoResponse, NexusError> {
    let bid = state
        .marketplace
        .place_bid(req.listing_id, req.bidder_id, req.amount)
        .await?;
    Ok((StatusCode::CREATED, Json(bid)))
}

/// `POST /marketplace/buy/{id}`: Buy a fixed-price listing.
///
/// # Errors
///
/// Returns [`NexusError::ListingNotFound`] or [`NexusError::NotFixedPrice`].
#[utoipa::path(
    post,
    path = "/api/v1/marketplace/buy/{id}",
    tag = "Marketplace",
    summary = "Buy a fixed-price listing",
    description = "Transfers the ticket to the buyer and removes the listing.",
    params(
        ("id" = u64, Path, description = "Listing id"),
    ),
    request_body = BuyListingRequest,
    responses(
        (status = 200, description = "Ticket transferred", body = Ticket),
        (status = 404, description = "Listing not found", body = ErrorResponse),
        (status = 422, description = "Listing is an auction", body = ErrorResponse),
    )
)]
pub async fn buy_listing(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ListingId>,
    ApiJson(req): ApiJson<BuyListingRequest>,
) -> Result<Json<Ticket>, NexusError> {
    Ok(Json(state.marketplace.buy_fixed(id, req.buyer_id).await?))
}

/// Marketplace routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/marketplace", get(list_marketplace))
        .route("/marketplace/list", post(create_listing))
        .route("/marketplace/bid", post(place_bid))
        .route("/marketplace/buy/{id}", post(buy_listing))
        .route("/marketplace/{id}", get(get_listing))
        .route("/marketplace/{id}/bids", get(list_bids))
}
