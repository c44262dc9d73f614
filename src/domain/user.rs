//! Marketplace participant identity.

use serde::Serialize;
use utoipa::ToSchema;

use super::UserId;
use super::store::Record;
use crate::error::NexusError;

/// A registered user.
///
/// Created by explicit registration or on first wallet contact and never
/// deleted. `username` is unique across all users; `wallet_address` is
/// unique whenever it is present.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Unique display name.
    pub username: String,
    /// Opaque credential. Never serialized.
    #[serde(skip_serializing)]
    pub password: String,
    /// Linked wallet address, if any.
    pub wallet_address: Option<String>,
}

/// Public subset of a [`User`] shown next to marketplace listings.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserSummary {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub username: String,
    /// Linked wallet address, if any.
    pub wallet_address: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            wallet_address: user.wallet_address.clone(),
        }
    }
}

impl Record for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }

    fn not_found(id: UserId) -> NexusError {
        NexusError::UserNotFound(id)
    }
}
