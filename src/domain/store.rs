//! In-memory entity store: the single source of truth for all records.
//!
//! [`EntityStore`] keeps one [`Table`] per entity kind behind a single
//! [`tokio::sync::RwLock`]. Services take the write guard for the whole
//! duration of an operation, so every check-then-act sequence (capacity,
//! purchase cap, bid floor, listing uniqueness) is serialized against
//! every other mutation.

use std::collections::BTreeMap;

use serde::Serialize;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use utoipa::ToSchema;

use super::ids::EntityId;
use super::{
    Bid, BidId, Event, EventId, ListingId, MarketListing, Ticket, TicketId, User, UserId,
};
use crate::error::NexusError;

/// A record that can live in a [`Table`].
pub trait Record: Clone + std::fmt::Debug {
    /// Identifier type allocated for this kind.
    type Id: EntityId;

    /// Returns the record's identifier.
    fn id(&self) -> Self::Id;

    /// Error reported when a record of this kind is missing.
    fn not_found(id: Self::Id) -> NexusError;
}

/// Arena of records of one kind keyed by a monotonically increasing id.
///
/// Identifiers start at 1 and are never reused, even after a delete.
#[derive(Debug)]
pub struct Table<T: Record> {
    rows: BTreeMap<T::Id, T>,
    next_id: u64,
}

impl<T: Record> Table<T> {
    /// Creates an empty table whose first id will be 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Allocates the next identifier, builds the record with it and
    /// stores it. Returns a copy of the stored record.
    pub fn create(&mut self, build: impl FnOnce(T::Id) -> T) -> T {
        let id = T::Id::from(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        let record = build(id);
        self.rows.insert(id, record.clone());
        record
    }

    /// Returns the record with the given id, or `None` when absent.
    #[must_use]
    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.rows.get(&id)
    }

    /// Returns the record or the kind-specific not-found error.
    ///
    /// # Errors
    ///
    /// Returns [`Record::not_found`] when the id is absent.
    pub fn require(&self, id: T::Id) -> Result<&T, NexusError> {
        self.rows.get(&id).ok_or_else(|| T::not_found(id))
    }

    /// Iterates over all records in ascending id order.
    pub fn list(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    /// Applies `apply` to the stored record and returns the result.
    ///
    /// # Errors
    ///
    /// Returns [`Record::not_found`] when the id is absent.
    pub fn update(&mut self, id: T::Id, apply: impl FnOnce(&mut T)) -> Result<T, NexusError> {
        let record = self.rows.get_mut(&id).ok_or_else(|| T::not_found(id))?;
        apply(record);
        Ok(record.clone())
    }

    /// Removes and returns the record, or `None` when absent.
    pub fn delete(&mut self, id: T::Id) -> Option<T> {
        self.rows.remove(&id)
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<T: Record> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// All entity tables, guarded together by [`EntityStore`].
#[derive(Debug, Default)]
pub struct Tables {
    /// Users.
    pub users: Table<User>,
    /// Events.
    pub events: Table<Event>,
    /// Tickets.
    pub tickets: Table<Ticket>,
    /// Active marketplace listings.
    pub listings: Table<MarketListing>,
    /// Accepted bids.
    pub bids: Table<Bid>,
}

impl Tables {
    /// Stores a new user, enforcing unique usernames and wallets.
    ///
    /// # Errors
    ///
    /// Returns [`NexusError::UsernameTaken`] or [`NexusError::WalletTaken`]
    /// when another user already holds the value.
    pub fn create_user(
        &mut self,
        username: String,
        password: String,
        wallet_address: Option<String>,
    ) -> Result<User, NexusError> {
        if self.user_by_username(&username).is_some() {
            return Err(NexusError::UsernameTaken(username));
        }
        if let Some(wallet) = wallet_address.as_deref()
            && self.user_by_wallet(wallet).is_some()
        {
            return Err(NexusError::WalletTaken(wallet.to_string()));
        }
        Ok(self.users.create(|id| User {
            id,
            username,
            password,
            wallet_address,
        }))
    }

    /// Finds the user linked to a wallet address.
    #[must_use]
    pub fn user_by_wallet(&self, wallet_address: &str) -> Option<&User> {
        self.users
            .list()
            .find(|u| u.wallet_address.as_deref() == Some(wallet_address))
    }

    /// Finds a user by username.
    #[must_use]
    pub fn user_by_username(&self, username: &str) -> Option<&User> {
        self.users.list().find(|u| u.username == username)
    }

    /// Tickets currently owned by a user, in id order.
    pub fn tickets_owned_by(&self, user_id: UserId) -> impl Iterator<Item = &Ticket> {
        self.tickets.list().filter(move |t| t.user_id == user_id)
    }

    /// Number of tickets a user holds for one event.
    #[must_use]
    pub fn tickets_held(&self, user_id: UserId, event_id: EventId) -> usize {
        self.tickets_owned_by(user_id)
            .filter(|t| t.event_id == event_id)
            .count()
    }

    /// Finds the ticket whose QR payload matches exactly.
    #[must_use]
    pub fn ticket_by_qr(&self, qr_code_data: &str) -> Option<&Ticket> {
        self.tickets.list().find(|t| t.qr_code_data == qr_code_data)
    }

    /// Returns `true` if a token id or QR payload is already minted.
    #[must_use]
    pub fn token_in_use(&self, token_id: &str, qr_code_data: &str) -> bool {
        self.tickets
            .list()
            .any(|t| t.token_id == token_id || t.qr_code_data == qr_code_data)
    }

    /// Returns the active listing for a ticket, if any.
    #[must_use]
    pub fn listing_for_ticket(&self, ticket_id: TicketId) -> Option<&MarketListing> {
        self.listings.list().find(|l| l.ticket_id == ticket_id)
    }

    /// Bids recorded against a listing, oldest first.
    pub fn bids_for_listing(&self, listing_id: ListingId) -> impl Iterator<Item = &Bid> {
        self.bids.list().filter(move |b| b.listing_id == listing_id)
    }

    /// Record counts per kind.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            users: self.users.len(),
            events: self.events.len(),
            tickets: self.tickets.len(),
            listings: self.listings.len(),
            bids: self.bids.len(),
        }
    }
}

/// Record counts reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct StoreStats {
    /// Registered users.
    pub users: usize,
    /// Events in the catalog.
    pub events: usize,
    /// Minted tickets.
    pub tickets: usize,
    /// Active listings.
    pub listings: usize,
    /// Recorded bids.
    pub bids: usize,
}

/// Process-wide entity store.
///
/// Constructed once at startup and shared with every service through an
/// `Arc`. All reads and writes go through [`EntityStore::read`] and
/// [`EntityStore::write`].
///
/// # Concurrency
///
/// - Readers run concurrently with each other.
/// - A writer excludes all readers and other writers, so an operation
///   that holds the write guard observes and mutates a consistent
///   snapshot across every table.
#[derive(Debug, Default)]
pub struct EntityStore {
    tables: RwLock<Tables>,
}

impl EntityStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires shared read access to all tables.
    pub async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    /// Acquires exclusive write access to all tables.
    pub async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }

    /// Returns record counts per kind.
    pub async fn stats(&self) -> StoreStats {
        self.read().await.stats()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn make_bid(id: BidId, listing_id: ListingId) -> Bid {
        Bid {
            id,
            listing_id,
            bidder_id: UserId::new(1),
            amount: Decimal::ONE,
            bid_time: Utc::now(),
        }
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut table: Table<Bid> = Table::new();
        let a = table.create(|id| make_bid(id, ListingId::new(1)));
        let b = table.create(|id| make_bid(id, ListingId::new(1)));
        assert_eq!(a.id, BidId::new(1));
        assert_eq!(b.id, BidId::new(2));
    }

    #[test]
    fn ids_are_never_reused_after_delete() {
        let mut table: Table<Bid> = Table::new();
        let a = table.create(|id| make_bid(id, ListingId::new(1)));
        assert!(table.delete(a.id).is_some());
        assert!(table.is_empty());

        let b = table.create(|id| make_bid(id, ListingId::new(1)));
        assert_eq!(b.id, BidId::new(2));
    }

    #[test]
    fn get_missing_is_none_not_error() {
        let table: Table<Bid> = Table::new();
        assert!(table.get(BidId::new(1)).is_none());
        assert!(matches!(
            table.require(BidId::new(1)),
            Err(NexusError::BidNotFound(_))
        ));
    }

    #[test]
    fn update_merges_into_existing_record() {
        let mut table: Table<Bid> = Table::new();
        let a = table.create(|id| make_bid(id, ListingId::new(1)));

        let Ok(updated) = table.update(a.id, |b| b.amount = Decimal::TWO) else {
            panic!("update failed");
        };
        assert_eq!(updated.amount, Decimal::TWO);
        assert_eq!(updated.listing_id, ListingId::new(1));
        assert_eq!(
            table.get(a.id).map(|b| b.amount),
            Some(Decimal::TWO)
        );
    }

    #[test]
    fn update_missing_fails_with_not_found() {
        let mut table: Table<Bid> = Table::new();
        let result = table.update(BidId::new(9), |b| b.amount = Decimal::TWO);
        assert!(matches!(result, Err(NexusError::BidNotFound(id)) if id == BidId::new(9)));
    }

    #[test]
    fn delete_missing_returns_none() {
        let mut table: Table<Bid> = Table::new();
        assert!(table.delete(BidId::new(1)).is_none());
    }

    #[test]
    fn usernames_and_wallets_are_unique() {
        let mut tables = Tables::default();
        let Ok(_) = tables.create_user("alice".into(), "pw".into(), Some("W1".into())) else {
            panic!("first user rejected");
        };

        let dup_name = tables.create_user("alice".into(), "pw".into(), None);
        assert!(matches!(dup_name, Err(NexusError::UsernameTaken(_))));

        let dup_wallet = tables.create_user("bob".into(), "pw".into(), Some("W1".into()));
        assert!(matches!(dup_wallet, Err(NexusError::WalletTaken(_))));

        let Ok(bob) = tables.create_user("bob".into(), "pw".into(), None) else {
            panic!("second user rejected");
        };
        assert_eq!(bob.id, UserId::new(2));
        assert_eq!(tables.user_by_wallet("W1").map(|u| u.id), Some(UserId::new(1)));
    }

    #[test]
    fn bids_for_listing_filters_by_listing() {
        let mut tables = Tables::default();
        tables.bids.create(|id| make_bid(id, ListingId::new(1)));
        tables.bids.create(|id| make_bid(id, ListingId::new(2)));
        tables.bids.create(|id| make_bid(id, ListingId::new(1)));

        let ids: Vec<BidId> = tables
            .bids_for_listing(ListingId::new(1))
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, vec![BidId::new(1), BidId::new(3)]);
    }

    #[tokio::test]
    async fn stats_counts_records() {
        let store = EntityStore::new();
        {
            let mut tables = store.write().await;
            let _ = tables.create_user("alice".into(), "pw".into(), None);
        }
        let stats = store.stats().await;
        assert_eq!(stats.users, 1);
        assert_eq!(stats.tickets, 0);
    }
}
