//! Error types for the Tonvault exchange core.
//!
//! All errors use the `TV_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Order errors
//! - 2xx: Balance errors
//! - 3xx: Wallet errors
//! - 4xx: Custody errors
//! - 5xx: Bridge errors
//! - 9xx: General / internal errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{OrderId, WalletId};

/// Central error enum for all Tonvault operations.
#[derive(Debug, Error)]
pub enum TonvaultError {
    // =================================================================
    // Order Errors (1xx)
    // =================================================================
    /// The requested order does not exist.
    #[error("TV_ERR_100: Order not found: {0}")]
    OrderNotFound(OrderId),

    /// The order failed validation (non-positive amount or price, bad token).
    #[error("TV_ERR_101: Invalid order: {reason}")]
    InvalidOrder { reason: String },

    /// The order has already been filled; it can never be filled again.
    #[error("TV_ERR_102: Order not open: {0}")]
    OrderNotOpen(OrderId),

    // =================================================================
    // Balance Errors (2xx)
    // =================================================================
    /// Not enough balance to perform the operation. The balance is unchanged.
    #[error("TV_ERR_200: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Decimal, available: Decimal },

    /// A deposit or withdrawal was requested with a non-positive amount.
    #[error("TV_ERR_201: Invalid amount: {0} (must be strictly positive)")]
    InvalidAmount(Decimal),

    /// Supply conservation invariant violated — critical safety alert.
    #[error("TV_ERR_202: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    // =================================================================
    // Wallet Errors (3xx)
    // =================================================================
    /// The referenced wallet does not exist.
    #[error("TV_ERR_300: Wallet not found: {0}")]
    WalletNotFound(WalletId),

    /// The supplied secret key bytes cannot form a signing key.
    #[error("TV_ERR_301: Invalid secret key: {reason}")]
    InvalidSecretKey { reason: String },

    // =================================================================
    // Custody Errors (4xx)
    // =================================================================
    /// Authentication failed while decrypting a secret blob: the blob was
    /// tampered with or the password is wrong. Never ignored silently.
    #[error("TV_ERR_400: Decryption failed: authentication tag mismatch")]
    DecryptionFailed,

    /// The encrypted-secret blob is not structurally valid
    /// (bad base64 or shorter than salt + nonce + tag).
    #[error("TV_ERR_401: Malformed secret blob: {reason}")]
    MalformedBlob { reason: String },

    // =================================================================
    // Bridge Errors (5xx)
    // =================================================================
    /// The chain node is unreachable or timed out. The caller may retry
    /// with backoff; the core never retries (double-broadcast risk).
    #[error("TV_ERR_500: Bridge unavailable: {reason}")]
    BridgeUnavailable { reason: String },

    /// The chain node explicitly rejected the transfer.
    #[error("TV_ERR_501: Broadcast rejected by node: {reason}")]
    BroadcastRejected { reason: String },

    /// The transfer envelope cannot be decoded or targets the wrong mode.
    #[error("TV_ERR_502: Invalid envelope: {reason}")]
    InvalidEnvelope { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("TV_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("TV_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (empty master password, missing RPC URL, etc.).
    #[error("TV_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, TonvaultError>;

impl From<serde_json::Error> for TonvaultError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = TonvaultError::OrderNotFound(OrderId::new());
        let msg = format!("{err}");
        assert!(msg.starts_with("TV_ERR_100"), "Got: {msg}");
    }

    #[test]
    fn insufficient_balance_display() {
        let err = TonvaultError::InsufficientBalance {
            needed: Decimal::new(100, 0),
            available: Decimal::new(50, 0),
        };
        let msg = format!("{err}");
        assert!(msg.contains("TV_ERR_200"));
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn all_errors_have_tv_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(TonvaultError::InvalidAmount(Decimal::ZERO)),
            Box::new(TonvaultError::DecryptionFailed),
            Box::new(TonvaultError::WalletNotFound(WalletId::new())),
            Box::new(TonvaultError::BridgeUnavailable {
                reason: "timeout".into(),
            }),
            Box::new(TonvaultError::Internal("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("TV_ERR_"),
                "Error missing TV_ERR_ prefix: {msg}"
            );
        }
    }
}
