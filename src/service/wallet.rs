//! Wallet service: user registration and wallet-based sign-in.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{ActivityEvent, EntityStore, EventBus, User, UserId};
use crate::error::NexusError;
use crate::provider::IdentityProvider;

/// Attempts to find a free generated username before giving up.
const PROVISION_ATTEMPTS: usize = 4;

/// Outcome of [`WalletService::connect`].
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WalletConnection {
    /// The user linked to the wallet.
    pub user: User,
    /// `true` if this call created the user.
    pub created: bool,
}

/// Orchestration layer for user accounts.
#[derive(Debug, Clone)]
pub struct WalletService {
    store: Arc<EntityStore>,
    identity: Arc<dyn IdentityProvider>,
    event_bus: EventBus,
}

impl WalletService {
    /// Creates a new `WalletService`.
    #[must_use]
    pub fn new(
        store: Arc<EntityStore>,
        identity: Arc<dyn IdentityProvider>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            store,
            identity,
            event_bus,
        }
    }

    /// Returns the user linked to `wallet_address`, creating one with a
    /// generated username on first contact.
    ///
    /// Repeated calls with the same address return the same user.
    ///
    /// # Errors
    ///
    /// - [`NexusError::InvalidRequest`] for a malformed address.
    /// - [`NexusError::Internal`] if no free username could be generated.
    pub async fn connect(&self, wallet_address: &str) -> Result<WalletConnection, NexusError> {
        let wallet_address = wallet_address.trim();
        self.identity.check_address(wallet_address)?;

        let mut tables = self.store.write().await;

        if let Some(user) = tables.user_by_wallet(wallet_address) {
            let user = user.clone();
            drop(tables);
            self.publish_connected(&user, false);
            tracing::debug!(user_id = %user.id, "wallet reconnected");
            return Ok(WalletConnection {
                user,
                created: false,
            });
        }

        let mut created = None;
        for _ in 0..PROVISION_ATTEMPTS {
            let identity = self.identity.provision(wallet_address);
            match tables.create_user(
                identity.username,
                identity.password,
                Some(wallet_address.to_string()),
            ) {
                Ok(user) => {
                    created = Some(user);
                    break;
                }
                Err(NexusError::UsernameTaken(name)) => {
                    tracing::warn!(username = %name, "generated username collided, retrying");
                }
                Err(e) => return Err(e),
            }
        }
        drop(tables);

        let user = created.ok_or_else(|| {
            NexusError::Internal("could not provision a unique username".to_string())
        })?;

        self.publish_connected(&user, true);
        tracing::info!(user_id = %user.id, username = %user.username, "wallet user created");
        Ok(WalletConnection {
            user,
            created: true,
        })
    }

    /// Registers a user with an explicit username.
    ///
    /// # Errors
    ///
    /// - [`NexusError::InvalidRequest`] for a blank username or password,
    ///   or a malformed wallet address.
    /// - [`NexusError::UsernameTaken`] / [`NexusError::WalletTaken`] on
    ///   collisions.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        wallet_address: Option<&str>,
    ) -> Result<User, NexusError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(NexusError::InvalidRequest(
                "username must not be blank".to_string(),
            ));
        }
        if password.is_empty() {
            return Err(NexusError::InvalidRequest(
                "password must not be empty".to_string(),
            ));
        }
        let wallet_address = wallet_address.map(str::trim);
        if let Some(address) = wallet_address {
            self.identity.check_address(address)?;
        }

        let user = self.store.write().await.create_user(
            username.to_string(),
            password.to_string(),
            wallet_address.map(str::to_string),
        )?;

        let _ = self.event_bus.publish(ActivityEvent::UserRegistered {
            user_id: user.id,
            username: user.username.clone(),
            timestamp: Utc::now(),
        });

        tracing::info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }

    /// Returns a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`NexusError::UserNotFound`] if the user does not exist.
    pub async fn get_user(&self, user_id: UserId) -> Result<User, NexusError> {
        self.store.read().await.users.require(user_id).cloned()
    }

    fn publish_connected(&self, user: &User, created: bool) {
        let _ = self.event_bus.publish(ActivityEvent::WalletConnected {
            user_id: user.id,
            wallet_address: user.wallet_address.clone().unwrap_or_default(),
            created,
            timestamp: Utc::now(),
        });
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::provider::{MockIdentityProvider, ProvisionedIdentity};
    use tokio_test::assert_err;

    const WALLET: &str = "sol8fCH3KVQ5Xw6SEJ2bA3mjJ4JKK7Q1GZJbZMdRN3d7a";

    fn make_service() -> WalletService {
        WalletService::new(
            Arc::new(EntityStore::new()),
            Arc::new(MockIdentityProvider),
            EventBus::new(100),
        )
    }

    #[tokio::test]
    async fn connect_is_idempotent() {
        let service = make_service();
        let mut rx = service.event_bus.subscribe();

        let Ok(first) = service.connect(WALLET).await else {
            panic!("first connect failed");
        };
        assert!(first.created);
        assert!(first.user.username.starts_with("user_"));
        assert_eq!(first.user.wallet_address.as_deref(), Some(WALLET));

        let Ok(second) = service.connect(WALLET).await else {
            panic!("second connect failed");
        };
        assert!(!second.created);
        assert_eq!(second.user.id, first.user.id);
        assert_eq!(second.user.username, first.user.username);

        let Ok(ActivityEvent::WalletConnected { created, .. }) = rx.recv().await else {
            panic!("expected WalletConnected");
        };
        assert!(created);
    }

    #[tokio::test]
    async fn distinct_wallets_get_distinct_users() {
        let service = make_service();
        let (Ok(a), Ok(b)) = (service.connect("WalletA").await, service.connect("WalletB").await)
        else {
            panic!("connect failed");
        };
        assert_ne!(a.user.id, b.user.id);
        assert_ne!(a.user.username, b.user.username);
    }

    #[tokio::test]
    async fn malformed_wallet_is_rejected() {
        let service = make_service();
        assert_err!(service.connect("").await);
        assert_err!(service.connect("not a wallet").await);
    }

    #[derive(Debug)]
    struct SameName;

    impl IdentityProvider for SameName {
        fn check_address(&self, _: &str) -> Result<(), NexusError> {
            Ok(())
        }

        fn provision(&self, _: &str) -> ProvisionedIdentity {
            ProvisionedIdentity {
                username: "user_fixed".to_string(),
                password: "secret".to_string(),
            }
        }
    }

    #[tokio::test]
    async fn exhausted_username_generation_is_internal() {
        let service = WalletService::new(
            Arc::new(EntityStore::new()),
            Arc::new(SameName),
            EventBus::new(10),
        );
        let Ok(_) = service.connect("W1").await else {
            panic!("first connect failed");
        };
        let result = service.connect("W2").await;
        assert!(matches!(result, Err(NexusError::Internal(_))));
    }

    #[tokio::test]
    async fn register_enforces_uniqueness() {
        let service = make_service();
        let Ok(user) = service.register("jane", "pw", Some("WalletJ")).await else {
            panic!("register failed");
        };
        assert_eq!(user.id, UserId::new(1));

        let dup = service.register("jane", "pw", None).await;
        assert!(matches!(dup, Err(NexusError::UsernameTaken(_))));

        let dup_wallet = service.register("john", "pw", Some("WalletJ")).await;
        assert!(matches!(dup_wallet, Err(NexusError::WalletTaken(_))));

        // Connecting the registered wallet resolves to the same user.
        let Ok(conn) = service.connect("WalletJ").await else {
            panic!("connect failed");
        };
        assert!(!conn.created);
        assert_eq!(conn.user.id, user.id);
    }

    #[tokio::test]
    async fn register_rejects_blank_fields() {
        let service = make_service();
        assert!(matches!(
            service.register("  ", "pw", None).await,
            Err(NexusError::InvalidRequest(_))
        ));
        assert!(matches!(
            service.register("jane", "", None).await,
            Err(NexusError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn get_user_reports_missing() {
        let service = make_service();
        assert!(matches!(
            service.get_user(UserId::new(3)).await,
            Err(NexusError::UserNotFound(_))
        ));
    }

    #[test]
    fn password_is_not_serialized() {
        let user = User {
            id: UserId::new(1),
            username: "jane".to_string(),
            password: "hunter2".to_string(),
            wallet_address: None,
        };
        let json = serde_json::to_string(&user).unwrap_or_default();
        assert!(!json.contains("hunter2"));
        assert!(!json.contains("password"));
    }
}
