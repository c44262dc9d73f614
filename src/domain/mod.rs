//! Domain layer: entities, identifiers, the entity store, and the
//! activity event system.
//!
//! Entities are plain records owned exclusively by [`EntityStore`];
//! services borrow them through the store's lock guards and never keep
//! private copies.

pub mod activity;
pub mod bid;
pub mod event;
pub mod event_bus;
pub mod ids;
pub mod listing;
pub mod store;
pub mod ticket;
pub mod user;

pub use activity::ActivityEvent;
pub use bid::Bid;
pub use event::{Event, NewEvent};
pub use event_bus::EventBus;
pub use ids::{BidId, EntityId, EventId, ListingId, TicketId, UserId};
pub use listing::{ListingType, ListingView, MarketListing};
pub use store::{EntityStore, Record, StoreStats, Table, Tables};
pub use ticket::{Ticket, TicketWithEvent};
pub use user::{User, UserSummary};
