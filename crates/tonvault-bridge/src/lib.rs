//! # tonvault-bridge
//!
//! Dual-mode settlement bridge between the internal ledger and the chain.
//!
//! A [`Broadcaster`] turns transfer intents into base64 JSON envelopes and
//! pushes them out: [`SimulatedBroadcaster`] fabricates deterministic
//! `sim_` transaction hashes with no network I/O, [`ChainBroadcaster`]
//! signs and submits real transfers over JSON-RPC. The mode is chosen once
//! from [`BridgeConfig`] at startup and baked into every envelope; a
//! broadcaster refuses envelopes stamped for the other mode.
//!
//! [`BridgeConfig`]: tonvault_types::BridgeConfig

pub mod broadcaster;
pub mod chain;
pub mod simulated;

pub use broadcaster::{Broadcaster, broadcaster_for};
pub use chain::ChainBroadcaster;
pub use simulated::SimulatedBroadcaster;
