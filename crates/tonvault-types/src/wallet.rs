//! Wallet types for the Tonvault custody layer.
//!
//! A wallet is created once per owner action and is immutable afterwards;
//! only the balances and orders referencing it change. The secret signing
//! key never appears here — only its encrypted blob.

use serde::{Deserialize, Serialize};

use crate::{AccountId, WalletId};

/// A custodial wallet, as persisted:
/// `wallets(id, owner_id, address, public_key, encrypted_secret)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    pub id: WalletId,
    /// The owning account. A wallet is exclusively owned.
    pub account_id: AccountId,
    /// Public on-chain address, derived one-way from the secret.
    pub address: String,
    /// Hex-encoded public key.
    pub public_key: String,
    /// Opaque encrypted-secret blob: base64(salt ∥ nonce ∥ tag ∥ ciphertext).
    /// Read-only after creation.
    pub encrypted_secret: String,
}

/// The public half of a derived wallet: what custody hands back without
/// ever exposing the secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletKeys {
    pub address: String,
    /// Hex-encoded public key.
    pub public_key: String,
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Wallet {
    pub fn dummy(account_id: AccountId) -> Self {
        use rand::Rng;
        let tag: u32 = rand::thread_rng().r#gen();
        Self {
            id: WalletId::new(),
            account_id,
            address: format!("EQ{tag:046x}"),
            public_key: format!("{tag:064x}"),
            encrypted_secret: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_serde_roundtrip() {
        let wallet = Wallet::dummy(AccountId::new());
        let json = serde_json::to_string(&wallet).unwrap();
        let back: Wallet = serde_json::from_str(&json).unwrap();
        assert_eq!(wallet.id, back.id);
        assert_eq!(wallet.address, back.address);
    }

    #[test]
    fn dummy_address_has_prefix() {
        let wallet = Wallet::dummy(AccountId::new());
        assert!(wallet.address.starts_with("EQ"));
    }
}
