//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The endpoint at `/ws` streams [`crate::domain::ActivityEvent`]s to
//! clients that subscribe to catalog events, marketplace listings, or
//! everything.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
