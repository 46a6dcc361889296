//! Secret generation and wallet derivation.
//!
//! A wallet secret is a 32-byte ed25519 seed. Derivation is deterministic:
//! the same seed always yields the same signing key, public key, and
//! address, so a wallet can be rebuilt from its decrypted secret alone.

use ed25519_dalek::SigningKey;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use tonvault_types::{
    Result, TonvaultError, WalletKeys,
    constants::{ADDRESS_HASH_CHARS, ADDRESS_PREFIX, SECRET_KEY_LEN},
};
use zeroize::Zeroizing;

/// Generate a fresh wallet secret from OS randomness.
#[must_use]
pub fn generate_secret() -> Zeroizing<[u8; SECRET_KEY_LEN]> {
    let mut seed = Zeroizing::new([0u8; SECRET_KEY_LEN]);
    OsRng.fill_bytes(seed.as_mut());
    seed
}

/// Build the ed25519 signing key for a wallet secret.
///
/// # Errors
/// Returns [`TonvaultError::InvalidSecretKey`] if the secret is not exactly
/// [`SECRET_KEY_LEN`] bytes.
pub fn signing_key(secret: &[u8]) -> Result<SigningKey> {
    let seed: &[u8; SECRET_KEY_LEN] =
        secret
            .try_into()
            .map_err(|_| TonvaultError::InvalidSecretKey {
                reason: format!(
                    "expected {SECRET_KEY_LEN} bytes, got {}",
                    secret.len()
                ),
            })?;
    Ok(SigningKey::from_bytes(seed))
}

/// Derive the public wallet identity from a secret.
///
/// The address is the `EQ` prefix followed by the first
/// [`ADDRESS_HASH_CHARS`] hex characters of sha256 over the raw public key
/// bytes. One-way: the address reveals nothing about the secret.
///
/// # Errors
/// Returns [`TonvaultError::InvalidSecretKey`] on wrong-length input.
pub fn derive_wallet(secret: &[u8]) -> Result<WalletKeys> {
    let verifying = signing_key(secret)?.verifying_key();
    let public_key = hex::encode(verifying.as_bytes());

    let digest = hex::encode(Sha256::digest(verifying.as_bytes()));
    let address = format!("{ADDRESS_PREFIX}{}", &digest[..ADDRESS_HASH_CHARS]);

    tracing::debug!(address = %address, "wallet identity derived");
    Ok(WalletKeys {
        address,
        public_key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_secrets_differ() {
        let a = generate_secret();
        let b = generate_secret();
        assert_ne!(*a, *b);
    }

    #[test]
    fn derivation_is_deterministic() {
        let secret = generate_secret();
        let first = derive_wallet(secret.as_ref()).unwrap();
        let second = derive_wallet(secret.as_ref()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn address_has_expected_shape() {
        let secret = [7u8; SECRET_KEY_LEN];
        let keys = derive_wallet(&secret).unwrap();
        assert!(keys.address.starts_with(ADDRESS_PREFIX));
        assert_eq!(
            keys.address.len(),
            ADDRESS_PREFIX.len() + ADDRESS_HASH_CHARS
        );
        assert!(
            keys.address[ADDRESS_PREFIX.len()..]
                .chars()
                .all(|c| c.is_ascii_hexdigit())
        );
        // 32-byte public key, hex encoded.
        assert_eq!(keys.public_key.len(), 64);
    }

    #[test]
    fn distinct_secrets_yield_distinct_wallets() {
        let a = derive_wallet(&[1u8; SECRET_KEY_LEN]).unwrap();
        let b = derive_wallet(&[2u8; SECRET_KEY_LEN]).unwrap();
        assert_ne!(a.address, b.address);
        assert_ne!(a.public_key, b.public_key);
    }

    #[test]
    fn random_secrets_never_collide() {
        use std::collections::HashSet;
        let mut addresses = HashSet::new();
        let mut public_keys = HashSet::new();
        for _ in 0..500 {
            let keys = derive_wallet(generate_secret().as_ref()).unwrap();
            assert!(addresses.insert(keys.address), "address collision");
            assert!(public_keys.insert(keys.public_key), "public key collision");
        }
    }

    #[test]
    fn wrong_length_secret_is_rejected() {
        let err = derive_wallet(&[0u8; 31]).unwrap_err();
        assert!(matches!(err, TonvaultError::InvalidSecretKey { .. }));
        let err = derive_wallet(&[0u8; 33]).unwrap_err();
        assert!(matches!(err, TonvaultError::InvalidSecretKey { .. }));
    }

    #[test]
    fn signing_key_matches_derived_public_key() {
        let secret = generate_secret();
        let keys = derive_wallet(secret.as_ref()).unwrap();
        let signer = signing_key(secret.as_ref()).unwrap();
        assert_eq!(hex::encode(signer.verifying_key().as_bytes()), keys.public_key);
    }
}
