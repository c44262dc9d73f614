//! Wallet identity checks and account provisioning.

use std::fmt;

use crate::error::NexusError;

/// Longest wallet address accepted by [`MockIdentityProvider`].
const MAX_ADDRESS_LEN: usize = 128;

/// Credentials generated for a wallet seen for the first time.
#[derive(Debug, Clone)]
pub struct ProvisionedIdentity {
    /// Generated username.
    pub username: String,
    /// Generated password placeholder.
    pub password: String,
}

/// Resolves external wallet identities.
pub trait IdentityProvider: Send + Sync + fmt::Debug {
    /// Checks that `wallet_address` is a well-formed address.
    ///
    /// # Errors
    ///
    /// Returns [`NexusError::InvalidRequest`] for a malformed address.
    fn check_address(&self, wallet_address: &str) -> Result<(), NexusError>;

    /// Generates the account placeholder for a new wallet.
    fn provision(&self, wallet_address: &str) -> ProvisionedIdentity;
}

/// Provider that accepts any non-empty alphanumeric address and makes up
/// a random username and password.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockIdentityProvider;

impl IdentityProvider for MockIdentityProvider {
    fn check_address(&self, wallet_address: &str) -> Result<(), NexusError> {
        if wallet_address.is_empty() {
            return Err(NexusError::InvalidRequest(
                "wallet address is required".to_string(),
            ));
        }
        if wallet_address.len() > MAX_ADDRESS_LEN
            || !wallet_address.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(NexusError::InvalidRequest(format!(
                "malformed wallet address: {wallet_address}"
            )));
        }
        Ok(())
    }

    fn provision(&self, _wallet_address: &str) -> ProvisionedIdentity {
        ProvisionedIdentity {
            username: format!("user_{}", super::random_suffix(8)),
            password: super::random_suffix(13),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_base58_like_addresses() {
        let provider = MockIdentityProvider;
        assert!(
            provider
                .check_address("sol8fCH3KVQ5Xw6SEJ2bA3mjJ4JKK7Q1GZJbZMdRN3d7a")
                .is_ok()
        );
    }

    #[test]
    fn rejects_empty_and_malformed_addresses() {
        let provider = MockIdentityProvider;
        assert!(provider.check_address("").is_err());
        assert!(provider.check_address("has space").is_err());
        assert!(provider.check_address(&"a".repeat(200)).is_err());
    }

    #[test]
    fn provisions_prefixed_username() {
        let identity = MockIdentityProvider.provision("W1");
        assert!(identity.username.starts_with("user_"));
        assert_eq!(identity.username.len(), 13);
        assert_eq!(identity.password.len(), 13);
    }
}
