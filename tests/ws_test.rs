//! End-to-end WebSocket activity feed tests.

#![allow(clippy::panic, clippy::indexing_slicing)]

mod common;

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use common::{TestApp, id_of, spawn_app};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn connect(app: &TestApp) -> Socket {
    let Ok((socket, _)) = connect_async(app.ws_url()).await else {
        panic!("ws connect failed");
    };
    socket
}

async fn send(socket: &mut Socket, payload: Value) {
    let envelope = json!({ "id": "c1", "type": "command", "payload": payload });
    let Ok(()) = socket.send(Message::text(envelope.to_string())).await else {
        panic!("ws send failed");
    };
}

/// Waits for the next text frame, failing after two seconds.
async fn next_json(socket: &mut Socket) -> Value {
    loop {
        let Ok(Some(Ok(msg))) = tokio::time::timeout(Duration::from_secs(2), socket.next()).await
        else {
            panic!("no ws message received");
        };
        if let Message::Text(text) = msg {
            let Ok(value) = serde_json::from_str::<Value>(text.as_str()) else {
                panic!("ws frame is not JSON");
            };
            return value;
        }
    }
}

#[tokio::test]
async fn subscribed_event_receives_purchase_activity() {
    let app = spawn_app().await;
    let event_id = app.create_event("Live", 10).await;
    let mut socket = connect(&app).await;

    send(&mut socket, json!({ "command": "subscribe", "event_ids": [event_id] })).await;
    let ack = next_json(&mut socket).await;
    assert_eq!(ack["type"], "response");
    assert_eq!(ack["payload"]["count"], 1);

    let (status, ticket) = app.purchase(event_id, 1, "L1").await;
    assert_eq!(status, 201);

    let msg = next_json(&mut socket).await;
    assert_eq!(msg["type"], "event");
    assert_eq!(msg["payload"]["event_type"], "ticket_purchased");
    assert_eq!(msg["payload"]["ticket_id"], id_of(&ticket));
    assert_eq!(msg["payload"]["tickets_sold"], 1);
}

#[tokio::test]
async fn unrelated_activity_is_filtered() {
    let app = spawn_app().await;
    let ignored = app.create_event("Ignored", 10).await;
    let watched = app.create_event("Watched", 10).await;
    let mut socket = connect(&app).await;

    send(&mut socket, json!({ "command": "subscribe", "event_ids": [watched] })).await;
    let _ack = next_json(&mut socket).await;

    let (status, _) = app.purchase(ignored, 1, "I1").await;
    assert_eq!(status, 201);
    let (status, _) = app.purchase(watched, 1, "W1").await;
    assert_eq!(status, 201);

    let msg = next_json(&mut socket).await;
    assert_eq!(msg["payload"]["event_id"], watched);
}

#[tokio::test]
async fn listing_subscription_follows_bids() {
    let app = spawn_app().await;
    let event_id = app.create_event("Cup Final", 10).await;
    let (_, ticket) = app.purchase(event_id, 1, "C1").await;
    let (_, listing) = app
        .post(
            "/api/v1/marketplace/list",
            &json!({
                "ticket_id": id_of(&ticket),
                "seller_id": 1,
                "price": "1.0",
                "listing_type": "auction",
                "ends_at": "2099-01-01T00:00:00Z",
            }),
        )
        .await;
    let listing_id = id_of(&listing);

    let mut socket = connect(&app).await;
    send(&mut socket, json!({ "command": "subscribe", "listing_ids": [listing_id] })).await;
    let _ack = next_json(&mut socket).await;

    let (status, _) = app
        .post(
            "/api/v1/marketplace/bid",
            &json!({ "listing_id": listing_id, "bidder_id": 2, "amount": "2.0" }),
        )
        .await;
    assert_eq!(status, 201);

    let msg = next_json(&mut socket).await;
    assert_eq!(msg["payload"]["event_type"], "bid_placed");
    assert_eq!(msg["payload"]["listing_id"], listing_id);
    assert_eq!(msg["payload"]["amount"], "2.0");
}

#[tokio::test]
async fn wildcard_receives_user_activity() {
    let app = spawn_app().await;
    let mut socket = connect(&app).await;

    send(&mut socket, json!({ "command": "subscribe", "all": true })).await;
    let ack = next_json(&mut socket).await;
    assert_eq!(ack["payload"]["all"], true);

    let (status, _) = app
        .post("/api/v1/users", &json!({ "username": "jane", "password": "pw" }))
        .await;
    assert_eq!(status, 201);

    let msg = next_json(&mut socket).await;
    assert_eq!(msg["payload"]["event_type"], "user_registered");
    assert_eq!(msg["payload"]["username"], "jane");
}

#[tokio::test]
async fn malformed_command_gets_error_reply() {
    let app = spawn_app().await;
    let mut socket = connect(&app).await;

    let Ok(()) = socket.send(Message::text("not json")).await else {
        panic!("ws send failed");
    };
    let reply = next_json(&mut socket).await;
    assert_eq!(reply["type"], "error");
    assert_eq!(reply["payload"]["code"], 400);
}
