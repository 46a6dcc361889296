//! # tonvault-types
//!
//! Shared types, errors, and configuration for the **Tonvault** custodial
//! exchange core.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`WalletId`], [`AccountId`], [`OrderId`]
//! - **Wallet model**: [`Wallet`], [`WalletKeys`]
//! - **Balance model**: [`Asset`], [`BalanceSnapshot`]
//! - **Order model**: [`Order`], [`OrderSide`], [`OrderStatus`]
//! - **Bridge model**: [`TransferEnvelope`], [`TransferReceipt`], [`TransferStatus`], [`TxStatus`], [`BridgeMode`]
//! - **Configuration**: [`BridgeConfig`], [`ChainConfig`]
//! - **Errors**: [`TonvaultError`] with `TV_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod balance;
pub mod config;
pub mod constants;
pub mod envelope;
pub mod error;
pub mod ids;
pub mod order;
pub mod wallet;

// Re-export all primary types at crate root for ergonomic imports:
//   use tonvault_types::{Order, OrderSide, Wallet, TransferEnvelope, ...};

pub use balance::*;
pub use config::*;
pub use envelope::*;
pub use error::*;
pub use ids::*;
pub use order::*;
pub use wallet::*;

// Constants are accessed via `tonvault_types::constants::FOO`
// (not re-exported to avoid name collisions).
