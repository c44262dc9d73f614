//! # ticket-nexus
//!
//! REST API and WebSocket service for event ticketing: a primary sale
//! catalog with per-user purchase caps, venue check-in by QR code, and a
//! resale marketplace with fixed-price listings and ascending auctions.
//!
//! All state lives in one in-memory [`domain::EntityStore`]; every
//! service operation runs under its write guard, so capacity, purchase
//! caps, bid floors and listing uniqueness are never raced.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── TicketingService / MarketplaceService / WalletService (service/)
//!     ├── TokenMinter / IdentityProvider (provider/)
//!     ├── EventBus (domain/)
//!     │
//!     └── EntityStore (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod provider;
pub mod seed;
pub mod server;
pub mod service;
pub mod ws;
