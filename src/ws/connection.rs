//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching subscription commands and forwarding filtered activity.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::SubscriptionManager;
use crate::domain::ActivityEvent;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and replies to each.
/// - Forwards matching activity from the [`broadcast::Receiver`].
pub async fn run_connection(socket: WebSocket, mut event_rx: broadcast::Receiver<ActivityEvent>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let reply = handle_text_message(&text, &mut subs);
                        if let Some(json) = reply
                            && ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                    _ => {}
                }
            }
            event = event_rx.recv() => {
                match event {
                    Ok(activity) => {
                        if !subs.matches(&activity) {
                            continue;
                        }
                        let Some(json) = activity_message(&activity) else {
                            continue;
                        };
                        if ws_tx.send(Message::text(json)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind activity bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

/// Wraps an activity in an `event` envelope.
fn activity_message(activity: &ActivityEvent) -> Option<String> {
    let payload = serde_json::to_value(activity).ok()?;
    let msg = WsMessage::new(
        uuid::Uuid::new_v4().to_string(),
        WsMessageType::Event,
        payload,
    );
    serde_json::to_string(&msg).ok()
}

/// Handles a text message from the client, returning the JSON reply.
fn handle_text_message(text: &str, subs: &mut SubscriptionManager) -> Option<String> {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return serde_json::to_string(&WsMessage::error(String::new(), 400, "malformed JSON")).ok();
    };

    if msg.msg_type != WsMessageType::Command {
        return serde_json::to_string(&WsMessage::error(msg.id, 400, "expected a command")).ok();
    }

    let reply = match serde_json::from_value::<WsCommand>(msg.payload) {
        Ok(WsCommand::Subscribe {
            event_ids,
            listing_ids,
            all,
        }) => {
            subs.subscribe(&event_ids, &listing_ids, all);
            WsMessage::new(
                msg.id,
                WsMessageType::Response,
                serde_json::json!({
                    "subscribed": { "event_ids": event_ids, "listing_ids": listing_ids },
                    "count": subs.count(),
                    "all": subs.is_subscribed_all(),
                }),
            )
        }
        Ok(WsCommand::Unsubscribe {
            event_ids,
            listing_ids,
            all,
        }) => {
            subs.unsubscribe(&event_ids, &listing_ids, all);
            WsMessage::new(
                msg.id,
                WsMessageType::Response,
                serde_json::json!({
                    "unsubscribed": { "event_ids": event_ids, "listing_ids": listing_ids },
                    "remaining_count": subs.count(),
                    "all": subs.is_subscribed_all(),
                }),
            )
        }
        Err(e) => {
            tracing::debug!(error = %e, "unknown ws command");
            WsMessage::error(msg.id, 404, "unknown command")
        }
    };
    serde_json::to_string(&reply).ok()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{EventId, TicketId};
    use chrono::Utc;

    fn reply_to(text: &str, subs: &mut SubscriptionManager) -> WsMessage {
        let Some(json) = handle_text_message(text, subs) else {
            panic!("no reply");
        };
        let Ok(msg) = serde_json::from_str::<WsMessage>(&json) else {
            panic!("reply is not an envelope");
        };
        msg
    }

    #[test]
    fn subscribe_updates_filter_and_acknowledges() {
        let mut subs = SubscriptionManager::new();
        let reply = reply_to(
            r#"{"id":"c1","type":"command","payload":{"command":"subscribe","event_ids":[3]}}"#,
            &mut subs,
        );
        assert_eq!(reply.msg_type, WsMessageType::Response);
        assert_eq!(reply.id, "c1");
        assert_eq!(reply.payload["count"], 1);

        let checked_in = ActivityEvent::TicketCheckedIn {
            event_id: EventId::new(3),
            ticket_id: TicketId::new(1),
            used_date: Utc::now(),
        };
        assert!(subs.matches(&checked_in));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let mut subs = SubscriptionManager::new();
        let reply = reply_to("{not json", &mut subs);
        assert_eq!(reply.msg_type, WsMessageType::Error);
        assert_eq!(reply.payload["code"], 400);
    }

    #[test]
    fn unknown_command_is_an_error() {
        let mut subs = SubscriptionManager::new();
        let reply = reply_to(
            r#"{"id":"c2","type":"command","payload":{"command":"refund"}}"#,
            &mut subs,
        );
        assert_eq!(reply.msg_type, WsMessageType::Error);
        assert_eq!(reply.payload["code"], 404);
    }
}
