//! Ticketing service: event catalog, primary sales, check-in and
//! verification.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    ActivityEvent, EntityStore, Event, EventBus, EventId, NewEvent, Tables, Ticket, TicketId,
    TicketWithEvent, UserId,
};
use crate::error::NexusError;
use crate::provider::{MintedToken, TokenMinter};

/// Per-user cap on tickets held for a single event.
pub const DEFAULT_PURCHASE_LIMIT: usize = 5;

/// How many times minting is retried on a token or QR collision.
const MINT_ATTEMPTS: usize = 4;

/// Result of scanning a ticket's QR payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Verification {
    /// Scanned ticket.
    pub ticket: Ticket,
    /// Event the ticket admits to.
    pub event: Event,
    /// `true` while the ticket has not been used.
    pub valid: bool,
    /// Check-in time, if already used.
    pub used_date: Option<DateTime<Utc>>,
}

/// Orchestration layer for the event catalog and ticket lifecycle.
///
/// Every mutation follows the pattern: acquire the store write guard →
/// check preconditions in order → apply all effects → release the guard
/// → emit activity → return the result. A failing precondition returns
/// before anything is written.
#[derive(Debug, Clone)]
pub struct TicketingService {
    store: Arc<EntityStore>,
    minter: Arc<dyn TokenMinter>,
    event_bus: EventBus,
    purchase_limit: usize,
}

impl TicketingService {
    /// Creates a new `TicketingService`.
    #[must_use]
    pub fn new(
        store: Arc<EntityStore>,
        minter: Arc<dyn TokenMinter>,
        event_bus: EventBus,
        purchase_limit: usize,
    ) -> Self {
        Self {
            store,
            minter,
            event_bus,
            purchase_limit,
        }
    }

    /// Returns a reference to the inner [`EntityStore`].
    #[must_use]
    pub fn store(&self) -> &Arc<EntityStore> {
        &self.store
    }

    /// Returns the per-user, per-event purchase cap.
    #[must_use]
    pub const fn purchase_limit(&self) -> usize {
        self.purchase_limit
    }

    /// Returns every event in the catalog, in id order.
    pub async fn list_events(&self) -> Vec<Event> {
        self.store.read().await.events.list().cloned().collect()
    }

    /// Returns one event.
    ///
    /// # Errors
    ///
    /// Returns [`NexusError::EventNotFound`] if the event does not exist.
    pub async fn get_event(&self, event_id: EventId) -> Result<Event, NexusError> {
        self.store.read().await.events.require(event_id).cloned()
    }

    /// Adds an event to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`NexusError::InvalidRequest`] if the fields fail
    /// validation.
    pub async fn create_event(&self, new_event: NewEvent) -> Result<Event, NexusError> {
        new_event.validate()?;

        let event = self
            .store
            .write()
            .await
            .events
            .create(|id| new_event.into_event(id));

        let _ = self.event_bus.publish(ActivityEvent::EventCreated {
            event_id: event.id,
            title: event.title.clone(),
            tickets_available: event.tickets_available,
            timestamp: Utc::now(),
        });

        tracing::info!(event_id = %event.id, title = %event.title, "event created");
        Ok(event)
    }

    /// Mints a ticket for `seat_number` at an event.
    ///
    /// Preconditions are checked in order and the first failure wins:
    /// the event must exist, must not be sold out, and the buyer must hold
    /// fewer than the purchase cap for it. On success the ticket is stored
    /// and the event's sold counter is incremented in one step.
    ///
    /// # Errors
    ///
    /// - [`NexusError::InvalidRequest`] for a blank seat number.
    /// - [`NexusError::EventNotFound`] if the event does not exist.
    /// - [`NexusError::SoldOut`] if every seat is taken.
    /// - [`NexusError::PurchaseLimitExceeded`] if the buyer hit the cap.
    /// - [`NexusError::Internal`] if no unique token could be minted.
    pub async fn purchase(
        &self,
        event_id: EventId,
        user_id: UserId,
        seat_number: &str,
    ) -> Result<Ticket, NexusError> {
        let seat_number = seat_number.trim();
        if seat_number.is_empty() {
            return Err(NexusError::InvalidRequest(
                "seat_number must not be empty".to_string(),
            ));
        }

        let mut tables = self.store.write().await;

        let event = tables.events.require(event_id)?;
        if event.is_sold_out() {
            tracing::debug!(%event_id, %user_id, "purchase rejected: sold out");
            return Err(NexusError::SoldOut {
                event_id,
                tickets_available: event.tickets_available,
            });
        }

        if tables.tickets_held(user_id, event_id) >= self.purchase_limit {
            tracing::debug!(%event_id, %user_id, "purchase rejected: limit reached");
            return Err(NexusError::PurchaseLimitExceeded {
                limit: self.purchase_limit,
            });
        }

        let minted = self.mint_unique(&tables, event_id, seat_number)?;

        let event = tables.events.update(event_id, |e| {
            e.tickets_sold = e.tickets_sold.saturating_add(1);
        })?;
        let ticket = tables.tickets.create(|id| {
            Ticket::minted(
                id,
                event_id,
                user_id,
                seat_number.to_string(),
                minted.token_id,
                minted.qr_code_data,
            )
        });

        drop(tables);

        let _ = self.event_bus.publish(ActivityEvent::TicketPurchased {
            event_id,
            ticket_id: ticket.id,
            user_id,
            seat_number: ticket.seat_number.clone(),
            tickets_sold: event.tickets_sold,
            timestamp: ticket.purchase_date,
        });

        tracing::info!(
            ticket_id = %ticket.id,
            %event_id,
            %user_id,
            token_id = %ticket.token_id,
            tickets_sold = event.tickets_sold,
            "ticket purchased"
        );
        Ok(ticket)
    }

    /// Checks a ticket in at the venue.
    ///
    /// The transition is one-way: a used ticket is never re-stamped.
    ///
    /// # Errors
    ///
    /// - [`NexusError::TicketNotFound`] if the ticket does not exist.
    /// - [`NexusError::AlreadyUsed`] carrying the original check-in time.
    pub async fn check_in(&self, ticket_id: TicketId) -> Result<Ticket, NexusError> {
        let mut tables = self.store.write().await;

        let ticket = tables.tickets.require(ticket_id)?;
        if ticket.is_used {
            tracing::debug!(%ticket_id, "check-in rejected: already used");
            return Err(NexusError::AlreadyUsed {
                ticket_id,
                used_date: ticket.used_date,
            });
        }

        let now = Utc::now();
        let ticket = tables.tickets.update(ticket_id, |t| {
            t.is_used = true;
            t.used_date = Some(now);
        })?;

        drop(tables);

        let _ = self.event_bus.publish(ActivityEvent::TicketCheckedIn {
            event_id: ticket.event_id,
            ticket_id,
            used_date: now,
        });

        tracing::info!(%ticket_id, event_id = %ticket.event_id, "ticket checked in");
        Ok(ticket)
    }

    /// Looks a ticket up by its exact QR payload.
    ///
    /// # Errors
    ///
    /// - [`NexusError::InvalidCode`] if no ticket carries the payload.
    /// - [`NexusError::EventNotFound`] if the ticket's event is missing.
    pub async fn verify(&self, qr_code_data: &str) -> Result<Verification, NexusError> {
        let tables = self.store.read().await;

        let ticket = tables
            .ticket_by_qr(qr_code_data)
            .ok_or(NexusError::InvalidCode)?;
        let event = tables.events.require(ticket.event_id)?;

        Ok(Verification {
            valid: !ticket.is_used,
            used_date: ticket.used_date,
            ticket: ticket.clone(),
            event: event.clone(),
        })
    }

    /// Returns one ticket.
    ///
    /// # Errors
    ///
    /// Returns [`NexusError::TicketNotFound`] if the ticket does not exist.
    pub async fn get_ticket(&self, ticket_id: TicketId) -> Result<Ticket, NexusError> {
        self.store.read().await.tickets.require(ticket_id).cloned()
    }

    /// Returns the tickets a user owns, each joined with its event.
    pub async fn tickets_for_user(&self, user_id: UserId) -> Vec<TicketWithEvent> {
        let tables = self.store.read().await;
        tables
            .tickets_owned_by(user_id)
            .map(|ticket| TicketWithEvent {
                ticket: ticket.clone(),
                event: tables.events.get(ticket.event_id).cloned(),
            })
            .collect()
    }

    /// Asks the minter for identifiers that no stored ticket uses yet.
    fn mint_unique(
        &self,
        tables: &Tables,
        event_id: EventId,
        seat_number: &str,
    ) -> Result<MintedToken, NexusError> {
        for _ in 0..MINT_ATTEMPTS {
            let minted = self.minter.mint(event_id, seat_number);
            if !tables.token_in_use(&minted.token_id, &minted.qr_code_data) {
                return Ok(minted);
            }
            tracing::warn!(%event_id, token_id = %minted.token_id, "minted token collided, retrying");
        }
        Err(NexusError::Internal(
            "could not mint a unique ticket token".to_string(),
        ))
    }
}
