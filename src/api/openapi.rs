//! OpenAPI document covering every REST endpoint.

use utoipa::OpenApi;

use super::dto::{
    BuyListingRequest, ConnectWalletRequest, CreateEventRequest, CreateListingRequest,
    EventListResponse, ListingListResponse, PaginationMeta, PlaceBidRequest,
    PurchaseTicketRequest, RegisterUserRequest,
};
use super::handlers::{events, marketplace, system, tickets, users};
use crate::domain::{
    Bid, Event, ListingType, ListingView, MarketListing, StoreStats, Ticket, TicketWithEvent,
    User, UserSummary,
};
use crate::error::{ErrorBody, ErrorKind, ErrorResponse};
use crate::service::{Verification, WalletConnection};

/// Generated OpenAPI document, served at `/api-docs/openapi.json`.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "ticket-nexus",
        description = "Event ticketing with primary sales, venue check-in and a resale marketplace."
    ),
    paths(
        events::list_events,
        events::create_event,
        events::get_event,
        tickets::purchase_ticket,
        tickets::get_ticket,
        tickets::check_in_ticket,
        tickets::verify_ticket,
        marketplace::list_marketplace,
        marketplace::get_listing,
        marketplace::list_bids,
        marketplace::create_listing,
        marketplace::place_bid,
        marketplace::buy_listing,
        users::register_user,
        users::get_user,
        users::user_tickets,
        users::connect_wallet,
        system::health_handler,
        system::marketplace_config_handler,
    ),
    components(schemas(
        Event,
        Ticket,
        TicketWithEvent,
        MarketListing,
        ListingType,
        ListingView,
        Bid,
        User,
        UserSummary,
        StoreStats,
        Verification,
        WalletConnection,
        CreateEventRequest,
        EventListResponse,
        PurchaseTicketRequest,
        CreateListingRequest,
        PlaceBidRequest,
        BuyListingRequest,
        ListingListResponse,
        RegisterUserRequest,
        ConnectWalletRequest,
        PaginationMeta,
        ErrorResponse,
        ErrorBody,
        ErrorKind,
        system::HealthResponse,
        system::MarketplaceConfig,
    )),
    tags(
        (name = "Events", description = "Event catalog"),
        (name = "Tickets", description = "Primary sales, check-in and verification"),
        (name = "Marketplace", description = "Resale listings and auctions"),
        (name = "Users", description = "Registration and wallet sign-in"),
        (name = "System", description = "Health and configuration"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/events",
            "/api/v1/events/{id}",
            "/api/v1/tickets/purchase",
            "/api/v1/tickets/{id}/use",
            "/api/v1/tickets/verify/{qr_code}",
            "/api/v1/marketplace",
            "/api/v1/marketplace/buy/{id}",
            "/api/v1/wallet/connect",
            "/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
