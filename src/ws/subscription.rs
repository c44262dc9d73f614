//! Per-connection subscription manager.
//!
//! Tracks which catalog events and marketplace listings a WebSocket
//! client follows and filters activity server-side.

use std::collections::HashSet;

use crate::domain::{ActivityEvent, EventId, ListingId};

/// Manages the subscriptions of a single WebSocket connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    event_ids: HashSet<EventId>,
    listing_ids: HashSet<ListingId>,
    /// When set, every activity matches and the id sets are ignored.
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds topics to the subscription set.
    pub fn subscribe(&mut self, event_ids: &[EventId], listing_ids: &[ListingId], all: bool) {
        if all {
            self.subscribe_all = true;
        }
        self.event_ids.extend(event_ids.iter().copied());
        self.listing_ids.extend(listing_ids.iter().copied());
    }

    /// Removes topics from the subscription set.
    pub fn unsubscribe(&mut self, event_ids: &[EventId], listing_ids: &[ListingId], all: bool) {
        if all {
            self.subscribe_all = false;
        }
        for id in event_ids {
            self.event_ids.remove(id);
        }
        for id in listing_ids {
            self.listing_ids.remove(id);
        }
    }

    /// Returns `true` if the activity matches the subscription filter.
    #[must_use]
    pub fn matches(&self, activity: &ActivityEvent) -> bool {
        self.subscribe_all
            || activity
                .event_id()
                .is_some_and(|id| self.event_ids.contains(&id))
            || activity
                .listing_id()
                .is_some_and(|id| self.listing_ids.contains(&id))
    }

    /// Returns the number of explicitly subscribed topics.
    #[must_use]
    pub fn count(&self) -> usize {
        self.event_ids.len() + self.listing_ids.len()
    }

    /// Returns `true` if the catch-all subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}
