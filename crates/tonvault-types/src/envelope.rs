//! Transfer envelope and bridge result types.
//!
//! The envelope is the chain-agnostic description of an intended transfer:
//! base64(UTF-8 JSON `{mode, from, to, amount_nano, comment}`). It is
//! ephemeral — built by the bridge, consumed by a broadcaster, never
//! persisted by this core.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Result, TonvaultError};

/// Operating mode of the settlement bridge. Selected once at startup,
/// never mixed within one transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BridgeMode {
    Simulated,
    Chain,
}

impl std::fmt::Display for BridgeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Simulated => write!(f, "SIMULATED"),
            Self::Chain => write!(f, "CHAIN"),
        }
    }
}

/// An encoded transfer intent. Amounts are integer base units (nanotons).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEnvelope {
    pub mode: BridgeMode,
    pub from: String,
    pub to: String,
    pub amount_nano: u64,
    pub comment: Option<String>,
}

impl TransferEnvelope {
    /// Encode to the wire form: base64 over compact JSON.
    pub fn encode(&self) -> Result<String> {
        let raw = serde_json::to_vec(self)?;
        Ok(BASE64.encode(raw))
    }

    /// Decode from the wire form.
    ///
    /// # Errors
    /// Returns [`TonvaultError::InvalidEnvelope`] if the input is not
    /// valid base64 or does not decode to an envelope.
    pub fn decode(encoded: &str) -> Result<Self> {
        let raw = BASE64
            .decode(encoded)
            .map_err(|e| TonvaultError::InvalidEnvelope {
                reason: format!("bad base64: {e}"),
            })?;
        serde_json::from_slice(&raw).map_err(|e| TonvaultError::InvalidEnvelope {
            reason: format!("bad JSON: {e}"),
        })
    }
}

/// Result of a successful broadcast (simulated or real).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferReceipt {
    /// Node-assigned transaction hash, or a `sim_`-prefixed synthetic one.
    pub tx_hash: String,
    pub network: BridgeMode,
    pub amount_nano: u64,
    pub timestamp: DateTime<Utc>,
}

/// Confirmation state of a broadcast transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Pending,
    Success,
    Failed,
    /// Simulated mode never tracks confirmations.
    Unknown,
}

impl std::fmt::Display for TxStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending_or_not_found"),
            Self::Success => write!(f, "success"),
            Self::Failed => write!(f, "failed"),
            Self::Unknown => write!(f, "unknown (simulated)"),
        }
    }
}

/// Answer to a transfer-status query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferStatus {
    pub found: bool,
    pub status: TxStatus,
}
