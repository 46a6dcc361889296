//! Balance types for the Tonvault ledger.
//!
//! A balance is a single non-negative decimal amount per (wallet, token)
//! pair. Zero is a valid terminal value; rows are never deleted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::WalletId;

/// Type alias for token symbols (e.g., "TON", "SLH").
pub type Asset = String;

/// A point-in-time view of one balance row, as persisted:
/// `balances(wallet_id, token, amount)` unique on (wallet_id, token).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalanceSnapshot {
    pub wallet_id: WalletId,
    pub token: Asset,
    pub amount: Decimal,
}

impl BalanceSnapshot {
    /// Whether this row holds no funds.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_row_is_zero() {
        let row = BalanceSnapshot {
            wallet_id: WalletId::new(),
            token: "TON".to_string(),
            amount: Decimal::ZERO,
        };
        assert!(row.is_zero());
    }

    #[test]
    fn snapshot_serde_roundtrip() {
        let row = BalanceSnapshot {
            wallet_id: WalletId::new(),
            token: "SLH".to_string(),
            amount: Decimal::new(12345, 2), // 123.45
        };
        let json = serde_json::to_string(&row).unwrap();
        let back: BalanceSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(row, back);
    }
}
