//! Network-free broadcaster for development and tests.
//!
//! Produces transaction hashes that look plausible but are pure functions
//! of the envelope: `sim_` followed by hex sha256 over the encoded
//! envelope. Status queries never find anything — simulated transfers have
//! no confirmation lifecycle.

use chrono::Utc;
use sha2::{Digest, Sha256};
use tonvault_types::{
    BridgeMode, Result, TransferEnvelope, TransferReceipt, TransferStatus, TxStatus,
    constants::SIM_TX_PREFIX,
};

use crate::broadcaster::{Broadcaster, decode_for_mode};

/// Broadcaster that touches no network at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedBroadcaster;

impl SimulatedBroadcaster {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Broadcaster for SimulatedBroadcaster {
    fn mode(&self) -> BridgeMode {
        BridgeMode::Simulated
    }

    fn build_transfer(
        &self,
        from: &str,
        to: &str,
        amount_nano: u64,
        comment: Option<String>,
    ) -> Result<String> {
        TransferEnvelope {
            mode: BridgeMode::Simulated,
            from: from.to_string(),
            to: to.to_string(),
            amount_nano,
            comment,
        }
        .encode()
    }

    async fn broadcast(&self, envelope: &str, _secret: &[u8]) -> Result<TransferReceipt> {
        let decoded = decode_for_mode(envelope, BridgeMode::Simulated)?;

        let digest = Sha256::digest(envelope.as_bytes());
        let tx_hash = format!("{SIM_TX_PREFIX}{}", hex::encode(digest));

        tracing::info!(
            tx_hash = %tx_hash,
            amount_nano = decoded.amount_nano,
            "simulated transfer broadcast"
        );
        Ok(TransferReceipt {
            tx_hash,
            network: BridgeMode::Simulated,
            amount_nano: decoded.amount_nano,
            timestamp: Utc::now(),
        })
    }

    async fn transfer_status(&self, _tx_hash: &str) -> Result<TransferStatus> {
        Ok(TransferStatus {
            found: false,
            status: TxStatus::Unknown,
        })
    }
}
