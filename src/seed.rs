//! Demo catalog loaded at startup when `SEED_DEMO_DATA` is set.
//!
//! Everything goes through the services, so seeded records obey the same
//! invariants as live traffic. Only the pre-existing sold counts are
//! written straight into the store.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use crate::app_state::AppState;
use crate::domain::{EventId, ListingType, NewEvent, UserId};
use crate::error::NexusError;

/// Wallet linked to the seeded demo user.
pub const DEMO_WALLET: &str = "sol8fCH3KVQ5Xw6SEJ2bA3mjJ4JKK7Q1GZJbZMdRN3d7a";

/// Counts of seeded records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    /// Demo user id.
    pub user_id: UserId,
    /// Events created.
    pub events: usize,
    /// Tickets minted for the demo user.
    pub tickets: usize,
    /// Listings opened by the demo user.
    pub listings: usize,
}

struct DemoEvent {
    title: &'static str,
    description: &'static str,
    image_ref: &'static str,
    location: &'static str,
    days_ahead: i64,
    category: &'static str,
    price_cents: i64,
    capacity: u32,
    already_sold: u32,
}

const DEMO_EVENTS: [DemoEvent; 4] = [
    DemoEvent {
        title: "Solana Breakpoint Conference",
        description: "The premier Solana developer conference with workshops, talks, and networking opportunities.",
        image_ref: "https://images.unsplash.com/photo-1540039155733-5bb30b53aa14",
        location: "Singapore",
        days_ahead: 60,
        category: "Conference",
        price_cents: 250,
        capacity: 500,
        already_sold: 350,
    },
    DemoEvent {
        title: "EDM Summer Festival",
        description: "A high-energy electronic dance music festival featuring top DJs from around the world.",
        image_ref: "https://images.unsplash.com/photo-1564585222527-c2777a5bc6cb",
        location: "Crypto Arena, Los Angeles",
        days_ahead: 30,
        category: "Music",
        price_cents: 50,
        capacity: 2000,
        already_sold: 1200,
    },
    DemoEvent {
        title: "Lakers vs. Warriors",
        description: "NBA regular season basketball game between the Los Angeles Lakers and Golden State Warriors.",
        image_ref: "https://images.unsplash.com/photo-1501281668745-f7f57925c3b4",
        location: "Chase Center, San Francisco",
        days_ahead: 14,
        category: "Sports",
        price_cents: 120,
        capacity: 18000,
        already_sold: 12000,
    },
    DemoEvent {
        title: "Web3 Developer Summit",
        description: "A comprehensive conference for blockchain and web3 developers to learn the latest technologies.",
        image_ref: "https://images.unsplash.com/photo-1491438590914-bc09fcaaf77a",
        location: "Moscone Center, San Francisco",
        days_ahead: 45,
        category: "Conference",
        price_cents: 250,
        capacity: 1000,
        already_sold: 750,
    },
];

/// Loads the demo user, four events, five tickets and three listings.
///
/// # Errors
///
/// Fails if the store is not empty enough to hold the demo user, e.g.
/// [`NexusError::UsernameTaken`] when seeding twice.
pub async fn seed_demo_data(state: &AppState) -> Result<SeedSummary, NexusError> {
    let user = state
        .wallet
        .register("demo_user", "password123", Some(DEMO_WALLET))
        .await?;

    let mut event_ids: Vec<EventId> = Vec::with_capacity(DEMO_EVENTS.len());
    for demo in &DEMO_EVENTS {
        let event = state
            .ticketing
            .create_event(NewEvent {
                title: demo.title.to_string(),
                description: demo.description.to_string(),
                image_ref: Some(demo.image_ref.to_string()),
                location: demo.location.to_string(),
                date: Utc::now() + Duration::days(demo.days_ahead),
                category: demo.category.to_string(),
                ticket_price: Decimal::new(demo.price_cents, 2),
                tickets_available: demo.capacity,
            })
            .await?;
        state
            .ticketing
            .store()
            .write()
            .await
            .events
            .update(event.id, |e| e.tickets_sold = demo.already_sold)?;
        event_ids.push(event.id);
    }

    let seats = [
        (0, "VIP-25"),
        (1, "GA-45"),
        (2, "B-112"),
        (3, "A-7"),
        (2, "C-301"),
    ];
    let mut tickets = Vec::with_capacity(seats.len());
    for (index, seat) in seats {
        let Some(event_id) = event_ids.get(index).copied() else {
            return Err(NexusError::Internal(format!("demo event {index} missing")));
        };
        tickets.push(state.ticketing.purchase(event_id, user.id, seat).await?);
    }

    let offers = [
        (2, Decimal::new(15, 1), ListingType::Fixed, None),
        (
            3,
            Decimal::new(28, 1),
            ListingType::Auction,
            Some(Utc::now() + Duration::hours(24)),
        ),
        (4, Decimal::new(6, 1), ListingType::Fixed, None),
    ];
    for (index, price, listing_type, ends_at) in offers {
        let Some(ticket) = tickets.get(index) else {
            return Err(NexusError::Internal(format!("demo ticket {index} missing")));
        };
        state
            .marketplace
            .create_listing(ticket.id, user.id, price, listing_type, ends_at)
            .await?;
    }

    let summary = SeedSummary {
        user_id: user.id,
        events: event_ids.len(),
        tickets: tickets.len(),
        listings: offers.len(),
    };
    tracing::info!(
        events = summary.events,
        tickets = summary.tickets,
        listings = summary.listings,
        "demo data loaded"
    );
    Ok(summary)
}
