//! Password-based encryption of wallet secrets at rest.
//!
//! Stored blob layout, base64-encoded:
//!
//! ```text
//! salt (16) ∥ nonce (12) ∥ tag (16) ∥ ciphertext
//! ```
//!
//! The AES-256 key is derived from the master password with Argon2id over
//! the per-blob salt, so identical passwords never produce identical blobs
//! and a leaked database gives an attacker no precomputation shortcut. GCM
//! authentication means decryption either returns the exact original secret
//! or fails — never garbage bytes.

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, Key, KeyInit, Nonce};
use argon2::Argon2;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use rand::RngCore;
use rand::rngs::OsRng;
use tonvault_types::{
    Result, TonvaultError,
    constants::{AEAD_NONCE_LEN, AEAD_TAG_LEN, KDF_SALT_LEN},
};
use zeroize::Zeroizing;

const AEAD_KEY_LEN: usize = 32;

/// Derive the AEAD key from a password and per-blob salt.
fn derive_key(password: &str, salt: &[u8]) -> Result<Zeroizing<[u8; AEAD_KEY_LEN]>> {
    let mut key = Zeroizing::new([0u8; AEAD_KEY_LEN]);
    Argon2::default()
        .hash_password_into(password.as_bytes(), salt, key.as_mut())
        .map_err(|e| TonvaultError::Internal(format!("key derivation failed: {e}")))?;
    Ok(key)
}

/// Encrypt a wallet secret under the master password.
///
/// Every call draws a fresh salt and nonce, so encrypting the same secret
/// twice yields different blobs.
///
/// # Errors
/// Returns [`TonvaultError::Configuration`] on an empty password.
pub fn encrypt_secret(secret: &[u8], master_password: &str) -> Result<String> {
    if master_password.is_empty() {
        return Err(TonvaultError::Configuration(
            "master password must not be empty".to_string(),
        ));
    }

    let mut salt = [0u8; KDF_SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    let mut nonce = [0u8; AEAD_NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    let key = derive_key(master_password, &salt)?;
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_ref()));
    let sealed = cipher
        .encrypt(Nonce::from_slice(&nonce), secret)
        .map_err(|_| TonvaultError::Internal("secret encryption failed".to_string()))?;

    // The cipher appends the tag; the stored layout carries it ahead of
    // the ciphertext.
    let (ciphertext, tag) = sealed.split_at(sealed.len() - AEAD_TAG_LEN);
    let mut blob = Vec::with_capacity(KDF_SALT_LEN + AEAD_NONCE_LEN + sealed.len());
    blob.extend_from_slice(&salt);
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(tag);
    blob.extend_from_slice(ciphertext);
    Ok(BASE64.encode(blob))
}

/// Decrypt a stored blob back into the wallet secret.
///
/// # Errors
/// - [`TonvaultError::Configuration`] on an empty password.
/// - [`TonvaultError::MalformedBlob`] if the blob is not valid base64 or is
///   too short to contain salt, nonce, and tag.
/// - [`TonvaultError::DecryptionFailed`] on authentication failure — a
///   wrong password and a tampered blob are indistinguishable.
pub fn decrypt_secret(blob: &str, master_password: &str) -> Result<Zeroizing<Vec<u8>>> {
    if master_password.is_empty() {
        return Err(TonvaultError::Configuration(
            "master password must not be empty".to_string(),
        ));
    }

    let raw = BASE64
        .decode(blob)
        .map_err(|e| TonvaultError::MalformedBlob {
            reason: format!("invalid base64: {e}"),
        })?;
    let min_len = KDF_SALT_LEN + AEAD_NONCE_LEN + AEAD_TAG_LEN;
    if raw.len() < min_len {
        return Err(TonvaultError::MalformedBlob {
            reason: format!("blob is {} bytes, need at least {min_len}", raw.len()),
        });
    }

    let (salt, rest) = raw.split_at(KDF_SALT_LEN);
    let (nonce, rest) = rest.split_at(AEAD_NONCE_LEN);
    let (tag, ciphertext) = rest.split_at(AEAD_TAG_LEN);

    let key = derive_key(master_password, salt)?;
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_ref()));

    let mut sealed = Vec::with_capacity(ciphertext.len() + AEAD_TAG_LEN);
    sealed.extend_from_slice(ciphertext);
    sealed.extend_from_slice(tag);
    let plain = cipher
        .decrypt(Nonce::from_slice(nonce), sealed.as_slice())
        .map_err(|_| TonvaultError::DecryptionFailed)?;
    Ok(Zeroizing::new(plain))
}
