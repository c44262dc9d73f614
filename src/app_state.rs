//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::{EntityStore, EventBus};
use crate::provider::{IdentityProvider, MockIdentityProvider, MockTokenMinter, TokenMinter};
use crate::service::{MarketplaceService, TicketingService, WalletService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Event catalog, primary sales and check-in.
    pub ticketing: Arc<TicketingService>,
    /// Resale listings and auctions.
    pub marketplace: Arc<MarketplaceService>,
    /// Registration and wallet sign-in.
    pub wallet: Arc<WalletService>,
    /// Activity bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}

impl AppState {
    /// Wires all services onto one store using the mock providers.
    #[must_use]
    pub fn new(store: Arc<EntityStore>, event_bus: EventBus, purchase_limit: usize) -> Self {
        Self::with_providers(
            store,
            event_bus,
            purchase_limit,
            Arc::new(MockTokenMinter),
            Arc::new(MockIdentityProvider),
        )
    }

    /// Wires all services onto one store with explicit providers.
    #[must_use]
    pub fn with_providers(
        store: Arc<EntityStore>,
        event_bus: EventBus,
        purchase_limit: usize,
        minter: Arc<dyn TokenMinter>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let ticketing = TicketingService::new(
            Arc::clone(&store),
            minter,
            event_bus.clone(),
            purchase_limit,
        );
        let marketplace = MarketplaceService::new(Arc::clone(&store), event_bus.clone());
        let wallet = WalletService::new(store, identity, event_bus.clone());

        Self {
            ticketing: Arc::new(ticketing),
            marketplace: Arc::new(marketplace),
            wallet: Arc::new(wallet),
            event_bus,
        }
    }
}
