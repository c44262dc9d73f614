//! ticket-nexus server entry point.
//!
//! Loads configuration, wires the store and services, optionally seeds
//! demo data and serves REST and WebSocket endpoints until SIGINT or
//! SIGTERM.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use ticket_nexus::app_state::AppState;
use ticket_nexus::config::{LogFormat, NexusConfig};
use ticket_nexus::domain::{EntityStore, EventBus};
use ticket_nexus::{seed, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = NexusConfig::from_env().context("failed to load configuration")?;
    init_tracing(config.log_format);
    tracing::info!(
        addr = %config.listen_addr,
        max_tickets_per_event = config.max_tickets_per_event,
        "starting ticket-nexus"
    );

    let store = Arc::new(EntityStore::new());
    let event_bus = EventBus::new(config.event_bus_capacity);
    let state = AppState::new(
        Arc::clone(&store),
        event_bus,
        config.max_tickets_per_event,
    );

    if config.seed_demo_data {
        seed::seed_demo_data(&state)
            .await
            .context("failed to seed demo data")?;
    }

    server::run(state, &config).await?;

    let stats = store.stats().await;
    tracing::info!(
        events = stats.events,
        tickets = stats.tickets,
        listings = stats.listings,
        "store released"
    );
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}
