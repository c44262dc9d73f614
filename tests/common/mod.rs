//! Shared harness: boots the full router on an ephemeral port.

use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use ticket_nexus::app_state::AppState;
use ticket_nexus::config::NexusConfig;
use ticket_nexus::domain::{EntityStore, EventBus};
use ticket_nexus::server;

/// A running server plus an HTTP client pointed at it.
#[derive(Debug)]
pub struct TestApp {
    /// Bound address.
    pub addr: SocketAddr,
    /// Shared HTTP client.
    pub client: reqwest::Client,
    _shutdown: oneshot::Sender<()>,
}

impl TestApp {
    /// Absolute URL for `path`.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// WebSocket URL of the activity feed.
    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Sends a JSON `POST` and returns status and body.
    pub async fn post(&self, path: &str, body: &Value) -> (u16, Value) {
        let Ok(resp) = self.client.post(self.url(path)).json(body).send().await else {
            panic!("POST {path} failed");
        };
        read(resp).await
    }

    /// Sends a `GET` and returns status and body.
    pub async fn get(&self, path: &str) -> (u16, Value) {
        let Ok(resp) = self.client.get(self.url(path)).send().await else {
            panic!("GET {path} failed");
        };
        read(resp).await
    }

    /// Sends a bodiless `PATCH` and returns status and body.
    pub async fn patch(&self, path: &str) -> (u16, Value) {
        let Ok(resp) = self.client.patch(self.url(path)).send().await else {
            panic!("PATCH {path} failed");
        };
        read(resp).await
    }

    /// Creates an event and returns its id.
    pub async fn create_event(&self, title: &str, capacity: u32) -> u64 {
        let (status, body) = self
            .post(
                "/api/v1/events",
                &json!({
                    "title": title,
                    "description": "integration test",
                    "location": "Chase Center",
                    "date": "2030-08-21T19:30:00Z",
                    "category": "Sports",
                    "ticket_price": "1.2",
                    "tickets_available": capacity,
                }),
            )
            .await;
        assert_eq!(status, 201, "create event: {body}");
        id_of(&body)
    }

    /// Buys a ticket and returns status and body.
    pub async fn purchase(&self, event_id: u64, user_id: u64, seat: &str) -> (u16, Value) {
        self.post(
            "/api/v1/tickets/purchase",
            &json!({ "event_id": event_id, "user_id": user_id, "seat_number": seat }),
        )
        .await
    }
}

async fn read(resp: reqwest::Response) -> (u16, Value) {
    let status = resp.status().as_u16();
    let body = resp.json::<Value>().await.unwrap_or(Value::Null);
    (status, body)
}

/// Extracts the numeric `id` field.
pub fn id_of(body: &Value) -> u64 {
    let Some(id) = body.get("id").and_then(Value::as_u64) else {
        panic!("no id in {body}");
    };
    id
}

/// Extracts `error.kind` from an error envelope.
pub fn error_kind(body: &Value) -> &str {
    body.pointer("/error/kind")
        .and_then(Value::as_str)
        .unwrap_or_default()
}

/// Boots a fresh server with an empty store.
pub async fn spawn_app() -> TestApp {
    let config = NexusConfig::default();
    let state = AppState::new(
        Arc::new(EntityStore::new()),
        EventBus::new(1000),
        config.max_tickets_per_event,
    );
    let app = server::build_app(state, &config);

    let Ok(listener) = TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind failed");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };

    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(server::serve(listener, app, async {
        let _ = rx.await;
    }));

    TestApp {
        addr,
        client: reqwest::Client::new(),
        _shutdown: tx,
    }
}
