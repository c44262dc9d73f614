//! Frames exchanged on `/ws`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{EventId, ListingId};

/// Envelope shared by every frame on the activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsMessage {
    /// Echoed from the client's command, or a fresh UUID for pushed activity.
    #[serde(default)]
    pub id: String,
    /// Frame kind, serialized as `type`.
    #[serde(rename = "type")]
    pub msg_type: WsMessageType,
    /// ISO-8601 timestamp. Defaults to the receive time when omitted.
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl WsMessage {
    /// Builds a server-originated message stamped with the current time.
    #[must_use]
    pub fn new(id: String, msg_type: WsMessageType, payload: serde_json::Value) -> Self {
        Self {
            id,
            msg_type,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Builds an error reply.
    #[must_use]
    pub fn error(id: String, code: u16, message: &str) -> Self {
        Self::new(
            id,
            WsMessageType::Error,
            serde_json::json!({ "code": code, "message": message }),
        )
    }
}

/// Kind of a feed frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WsMessageType {
    /// Sent by the client.
    Command,
    /// Acknowledges a command.
    Response,
    /// Pushes one [`ActivityEvent`](crate::domain::ActivityEvent).
    Event,
    /// Rejects a frame the server could not act on.
    Error,
}

/// Commands that a client can send in a `command` payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum WsCommand {
    /// Start receiving activity for the given topics.
    Subscribe {
        /// Catalog events to follow.
        #[serde(default)]
        event_ids: Vec<EventId>,
        /// Marketplace listings to follow.
        #[serde(default)]
        listing_ids: Vec<ListingId>,
        /// Follow every activity.
        #[serde(default)]
        all: bool,
    },
    /// Stop receiving activity for the given topics.
    Unsubscribe {
        /// Catalog events to drop.
        #[serde(default)]
        event_ids: Vec<EventId>,
        /// Marketplace listings to drop.
        #[serde(default)]
        listing_ids: Vec<ListingId>,
        /// Drop the catch-all subscription.
        #[serde(default)]
        all: bool,
    },
}
