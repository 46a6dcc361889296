//! Configuration types for the Tonvault settlement bridge.

use serde::{Deserialize, Serialize};

use crate::{BridgeMode, Result, TonvaultError, constants};

/// Configuration for the settlement bridge. Read once at startup; the
/// selected mode never changes for the lifetime of the broadcaster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    pub mode: BridgeMode,
    /// Chain node RPC endpoint. Required in chain mode, ignored otherwise.
    pub rpc_url: String,
    /// Hard timeout for a single RPC call, in milliseconds.
    pub rpc_timeout_ms: u64,
    /// Chain-specific transfer parameters.
    pub chain: ChainConfig,
}

impl BridgeConfig {
    /// Simulated bridge: no network access, synthetic transaction hashes.
    #[must_use]
    pub fn simulated() -> Self {
        Self {
            mode: BridgeMode::Simulated,
            rpc_url: String::new(),
            rpc_timeout_ms: constants::DEFAULT_RPC_TIMEOUT_MS,
            chain: ChainConfig::default(),
        }
    }

    /// Real-chain bridge against the given node endpoint.
    #[must_use]
    pub fn chain(rpc_url: impl Into<String>) -> Self {
        Self {
            mode: BridgeMode::Chain,
            rpc_url: rpc_url.into(),
            rpc_timeout_ms: constants::DEFAULT_RPC_TIMEOUT_MS,
            chain: ChainConfig::default(),
        }
    }

    /// Validate the configuration before a broadcaster is built from it.
    ///
    /// # Errors
    /// Returns [`TonvaultError::Configuration`] if chain mode is selected
    /// without an RPC URL or with a zero timeout.
    pub fn validate(&self) -> Result<()> {
        if self.mode == BridgeMode::Chain && self.rpc_url.is_empty() {
            return Err(TonvaultError::Configuration(
                "chain mode requires rpc_url".to_string(),
            ));
        }
        if self.rpc_timeout_ms == 0 {
            return Err(TonvaultError::Configuration(
                "rpc_timeout_ms must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::simulated()
    }
}

/// Parameters of a native transfer on the target chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Network identifier included in every signed transfer.
    pub chain_id: u64,
    /// Fee limit per transfer.
    pub fee_limit: u64,
    /// Fee price in nanotons per fee unit.
    pub fee_price_nano: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: constants::DEFAULT_CHAIN_ID,
            fee_limit: constants::DEFAULT_FEE_LIMIT,
            fee_price_nano: constants::DEFAULT_FEE_PRICE_NANO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_config_validates() {
        assert!(BridgeConfig::simulated().validate().is_ok());
    }

    #[test]
    fn chain_config_requires_rpc_url() {
        let mut cfg = BridgeConfig::chain("");
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, TonvaultError::Configuration(_)));

        cfg.rpc_url = "http://localhost:8545".to_string();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut cfg = BridgeConfig::simulated();
        cfg.rpc_timeout_ms = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn config_serde_roundtrip() {
        let cfg = BridgeConfig::chain("http://node:8545");
        let json = serde_json::to_string(&cfg).unwrap();
        let back: BridgeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.mode, BridgeMode::Chain);
        assert_eq!(back.chain.chain_id, cfg.chain.chain_id);
    }
}
