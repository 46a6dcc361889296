//! Supply conservation invariant checker.
//!
//! Mathematical invariant enforced over the ledger:
//! ```text
//! ∀ token: Σ balances == Σ(deposits) - Σ(withdrawals)
//! ```
//!
//! Fills move funds between wallets without touching either side of the
//! equation, so a broken invariant means value was created or destroyed
//! somewhere it must not be. This is the ultimate safety net.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tonvault_types::{Asset, Result, TonvaultError};

/// Tracks per-token deposit and withdrawal totals and validates that the
/// ledger's actual supply matches.
pub struct SupplyConservation {
    /// Total deposits per token since genesis.
    deposits: HashMap<Asset, Decimal>,
    /// Total withdrawals per token since genesis.
    withdrawals: HashMap<Asset, Decimal>,
}

impl SupplyConservation {
    /// Create a new tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            deposits: HashMap::new(),
            withdrawals: HashMap::new(),
        }
    }

    /// Record a deposit.
    ///
    /// # Errors
    /// Returns [`TonvaultError::Internal`] if the running total would
    /// overflow; the tracker is unchanged.
    pub fn record_deposit(&mut self, token: &str, amount: Decimal) -> Result<()> {
        let entry = self
            .deposits
            .entry(token.to_string())
            .or_insert(Decimal::ZERO);
        *entry = entry
            .checked_add(amount)
            .ok_or_else(|| TonvaultError::Internal(format!("deposit total overflow for {token}")))?;
        Ok(())
    }

    /// Record a withdrawal.
    ///
    /// # Errors
    /// Returns [`TonvaultError::Internal`] if the running total would
    /// overflow; the tracker is unchanged.
    pub fn record_withdrawal(&mut self, token: &str, amount: Decimal) -> Result<()> {
        let entry = self
            .withdrawals
            .entry(token.to_string())
            .or_insert(Decimal::ZERO);
        *entry = entry.checked_add(amount).ok_or_else(|| {
            TonvaultError::Internal(format!("withdrawal total overflow for {token}"))
        })?;
        Ok(())
    }

    /// Expected total supply for a token: deposits - withdrawals.
    #[must_use]
    pub fn expected_supply(&self, token: &str) -> Decimal {
        let deposited = self.deposits.get(token).copied().unwrap_or(Decimal::ZERO);
        let withdrawn = self
            .withdrawals
            .get(token)
            .copied()
            .unwrap_or(Decimal::ZERO);
        deposited - withdrawn
    }

    /// Verify that the actual supply matches the expected supply.
    ///
    /// # Errors
    /// Returns [`TonvaultError::SupplyInvariantViolation`] if
    /// `actual_supply` differs from deposits minus withdrawals.
    pub fn verify(&self, token: &str, actual_supply: Decimal) -> Result<()> {
        let expected = self.expected_supply(token);
        if actual_supply != expected {
            return Err(TonvaultError::SupplyInvariantViolation {
                reason: format!(
                    "token {token}: actual supply {actual_supply} != expected {expected}"
                ),
            });
        }
        Ok(())
    }
}

impl Default for SupplyConservation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_supply_is_zero() {
        let sc = SupplyConservation::new();
        assert_eq!(sc.expected_supply("TON"), Decimal::ZERO);
        assert!(sc.verify("TON", Decimal::ZERO).is_ok());
    }

    #[test]
    fn deposits_and_withdrawals_offset() {
        let mut sc = SupplyConservation::new();
        sc.record_deposit("TON", Decimal::new(1000, 0)).unwrap();
        sc.record_withdrawal("TON", Decimal::new(300, 0)).unwrap();
        assert_eq!(sc.expected_supply("TON"), Decimal::new(700, 0));
        assert!(sc.verify("TON", Decimal::new(700, 0)).is_ok());
    }

    #[test]
    fn verify_fails_when_imbalanced() {
        let mut sc = SupplyConservation::new();
        sc.record_deposit("TON", Decimal::new(10, 0)).unwrap();
        let err = sc.verify("TON", Decimal::new(11, 0)).unwrap_err();
        assert!(matches!(
            err,
            TonvaultError::SupplyInvariantViolation { .. }
        ));
    }

    #[test]
    fn tokens_tracked_independently() {
        let mut sc = SupplyConservation::new();
        sc.record_deposit("TON", Decimal::new(5, 0)).unwrap();
        sc.record_deposit("SLH", Decimal::new(50, 0)).unwrap();
        assert_eq!(sc.expected_supply("TON"), Decimal::new(5, 0));
        assert_eq!(sc.expected_supply("SLH"), Decimal::new(50, 0));
    }

    #[test]
    fn overflowing_total_rejected_and_unchanged() {
        let mut sc = SupplyConservation::new();
        sc.record_deposit("TON", Decimal::MAX).unwrap();
        let err = sc.record_deposit("TON", Decimal::ONE).unwrap_err();
        assert!(matches!(err, TonvaultError::Internal(_)));
        assert_eq!(sc.expected_supply("TON"), Decimal::MAX);
    }
}
