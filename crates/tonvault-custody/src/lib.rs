//! # tonvault-custody
//!
//! Custodial key management: secret generation, ed25519 wallet derivation,
//! and password-based encryption of secrets at rest.
//!
//! The exchange never stores a plaintext secret. A wallet's secret exists
//! decrypted only inside [`Zeroizing`] buffers on the stack of whoever asked
//! for it, and is wiped when that buffer drops. Nothing in this crate logs
//! key material.
//!
//! [`Zeroizing`]: zeroize::Zeroizing

pub mod keys;
pub mod vault;

pub use keys::{derive_wallet, generate_secret, signing_key};
pub use vault::{decrypt_secret, encrypt_secret};
