//! Capability seams for the parts of the system that would talk to a
//! real ledger.
//!
//! [`TokenMinter`] produces the token id and QR payload of a new ticket;
//! [`IdentityProvider`] checks wallet addresses and provisions the
//! account placeholder for first-time wallets. The bundled mock
//! implementations generate random values from UUID v4 entropy.

pub mod identity;
pub mod minter;

pub use identity::{IdentityProvider, MockIdentityProvider, ProvisionedIdentity};
pub use minter::{MintedToken, MockTokenMinter, TokenMinter};

/// Returns `len` lowercase hex characters of fresh randomness.
pub(crate) fn random_suffix(len: usize) -> String {
    let mut out = String::with_capacity(len);
    while out.len() < len {
        out.push_str(&uuid::Uuid::new_v4().simple().to_string());
    }
    out.truncate(len);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_suffix_has_requested_length() {
        assert_eq!(random_suffix(8).len(), 8);
        assert_eq!(random_suffix(40).len(), 40);
        assert!(random_suffix(12).chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn random_suffix_differs_between_calls() {
        assert_ne!(random_suffix(16), random_suffix(16));
    }
}
