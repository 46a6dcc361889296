//! The broadcaster abstraction and mode selection.

use tonvault_types::{
    BridgeConfig, BridgeMode, Result, TonvaultError, TransferEnvelope, TransferReceipt,
    TransferStatus,
};

use crate::{ChainBroadcaster, SimulatedBroadcaster};

/// Pushes transfers toward the outside world.
///
/// Implementations are selected once from [`BridgeConfig`] and never
/// swapped per call. All methods are infallible on the happy path of their
/// own mode; an envelope stamped for the other mode is rejected with
/// [`TonvaultError::InvalidEnvelope`].
#[async_trait::async_trait]
pub trait Broadcaster: Send + Sync {
    /// The mode this broadcaster operates in.
    fn mode(&self) -> BridgeMode;

    /// Build the base64 JSON envelope for a transfer intent.
    ///
    /// # Errors
    /// Returns [`TonvaultError::Serialization`] if the envelope cannot be
    /// encoded.
    fn build_transfer(
        &self,
        from: &str,
        to: &str,
        amount_nano: u64,
        comment: Option<String>,
    ) -> Result<String>;

    /// Sign and send an envelope, returning the broadcast receipt.
    async fn broadcast(&self, envelope: &str, secret: &[u8]) -> Result<TransferReceipt>;

    /// Query the confirmation state of a previously broadcast transfer.
    async fn transfer_status(&self, tx_hash: &str) -> Result<TransferStatus>;
}

/// Build the broadcaster the configuration calls for.
///
/// # Errors
/// Returns [`TonvaultError::Configuration`] if the configuration does not
/// validate.
pub fn broadcaster_for(config: &BridgeConfig) -> Result<Box<dyn Broadcaster>> {
    config.validate()?;
    match config.mode {
        BridgeMode::Simulated => Ok(Box::new(SimulatedBroadcaster::new())),
        BridgeMode::Chain => Ok(Box::new(ChainBroadcaster::new(config)?)),
    }
}

/// Decode an envelope and insist it was built for `mode`.
pub(crate) fn decode_for_mode(encoded: &str, mode: BridgeMode) -> Result<TransferEnvelope> {
    let envelope = TransferEnvelope::decode(encoded)?;
    if envelope.mode != mode {
        return Err(TonvaultError::InvalidEnvelope {
            reason: format!("envelope is {} but broadcaster is {mode}", envelope.mode),
        });
    }
    Ok(envelope)
}
