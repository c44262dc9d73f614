//! Data Transfer Objects for REST request/response serialization.
//!
//! Money amounts are serialized as JSON strings and accepted as either
//! strings or numbers.

pub mod common_dto;
pub mod event_dto;
pub mod marketplace_dto;
pub mod ticket_dto;
pub mod user_dto;

pub use common_dto::*;
pub use event_dto::*;
pub use marketplace_dto::*;
pub use ticket_dto::*;
pub use user_dto::*;
