//! Type-safe entity identifiers.
//!
//! Every entity kind gets its own newtype around a `u64` so a ticket id
//! can never be passed where a listing id is expected. Values are
//! allocated by [`super::store::Table`] from a per-kind counter that
//! starts at 1 and is never rewound.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Common behaviour shared by all entity identifiers.
pub trait EntityId: Copy + Ord + fmt::Debug + fmt::Display + From<u64> {
    /// Returns the raw integer value.
    fn get(self) -> u64;
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw integer identifier.
            #[must_use]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl EntityId for $name {
            fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`super::User`].
    UserId
);
entity_id!(
    /// Identifier of a ticketed [`super::Event`].
    EventId
);
entity_id!(
    /// Identifier of a [`super::Ticket`].
    TicketId
);
entity_id!(
    /// Identifier of a [`super::MarketListing`].
    ListingId
);
entity_id!(
    /// Identifier of a [`super::Bid`].
    BidId
);
