//! User registration and wallet DTOs.

use serde::Deserialize;
use utoipa::ToSchema;

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterUserRequest {
    /// Unique display name.
    pub username: String,
    /// Credential placeholder.
    pub password: String,
    /// Optional wallet to link.
    #[serde(default)]
    pub wallet_address: Option<String>,
}

/// Request body for `POST /wallet/connect`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ConnectWalletRequest {
    /// Wallet address reported by the client.
    pub wallet_address: String,
}
