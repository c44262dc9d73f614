//! Service layer: business logic orchestration.
//!
//! Each service takes the [`crate::domain::EntityStore`] write guard for
//! the whole of an operation, releases it, then emits an
//! [`crate::domain::ActivityEvent`] through the
//! [`crate::domain::EventBus`].
//!
//! - [`TicketingService`]: catalog, primary sales, check-in, verification.
//! - [`MarketplaceService`]: resale listings, bids, fixed-price purchase.
//! - [`WalletService`]: registration and wallet sign-in.

pub mod marketplace;
pub mod ticketing;
pub mod wallet;

pub use marketplace::MarketplaceService;
pub use ticketing::{DEFAULT_PURCHASE_LIMIT, TicketingService, Verification};
pub use wallet::{WalletConnection, WalletService};
