//! Fan-out of [`ActivityEvent`]s to live subscribers.
//!
//! Services publish after releasing the store guard; WebSocket
//! connections each hold a receiver and filter on their own side.
//! Publishing never blocks and never fails an operation: with no
//! receivers the activity is simply discarded.

use tokio::sync::broadcast;

use super::ActivityEvent;

/// Cloneable handle to the activity broadcast channel.
///
/// The channel is a bounded ring. A receiver that falls more than
/// `capacity` activities behind skips the oldest ones and observes
/// [`broadcast::error::RecvError::Lagged`].
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ActivityEvent>,
}

impl EventBus {
    /// Opens a bus holding up to `capacity` undelivered activities per
    /// receiver. Zero is treated as one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _initial_rx) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Hands `activity` to every current receiver and returns how many
    /// there were.
    pub fn publish(&self, activity: ActivityEvent) -> usize {
        let kind = activity.event_type_str();
        match self.sender.send(activity) {
            Ok(delivered) => {
                tracing::trace!(kind, delivered, "activity published");
                delivered
            }
            Err(_) => 0,
        }
    }

    /// Opens a receiver that sees every activity published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ActivityEvent> {
        self.sender.subscribe()
    }

    /// Number of open receivers, i.e. live feed connections.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
