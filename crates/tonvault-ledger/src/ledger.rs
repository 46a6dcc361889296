//! The balance ledger: deposit / withdraw primitives.
//!
//! Balances are keyed by (wallet, token) with at most one row per pair.
//! Rows are created on first deposit and never deleted; zero is a valid
//! terminal value. Only `deposit`, `withdraw`, and `transfer` ever touch
//! a row — no other component writes balances.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tonvault_types::{Asset, BalanceSnapshot, Result, TonvaultError, WalletId};

use crate::conservation::SupplyConservation;

/// The authoritative balance store.
///
/// Every mutating call either fully applies or leaves the ledger
/// untouched; there are no partial writes within a single call. Callers
/// hold `&mut self`, so each call is one atomic unit.
pub struct Ledger {
    /// Per-(wallet, token) balances. Non-negative, always.
    balances: HashMap<(WalletId, Asset), Decimal>,
    /// Deposits-minus-withdrawals tracker backing `verify_supply`.
    supply: SupplyConservation,
}

impl Ledger {
    /// Create a new empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
            supply: SupplyConservation::new(),
        }
    }

    /// Deposit `amount` of `token` into a wallet, creating the row at zero
    /// if absent. Returns the resulting balance.
    ///
    /// # Errors
    /// - [`TonvaultError::InvalidAmount`] if `amount <= 0`
    /// - [`TonvaultError::Internal`] if the balance or the supply total
    ///   would overflow; the ledger is unchanged either way
    pub fn deposit(&mut self, wallet_id: WalletId, token: &str, amount: Decimal) -> Result<Decimal> {
        if amount <= Decimal::ZERO {
            return Err(TonvaultError::InvalidAmount(amount));
        }

        let key = (wallet_id, token.to_string());
        let updated = self
            .balances
            .get(&key)
            .copied()
            .unwrap_or(Decimal::ZERO)
            .checked_add(amount)
            .ok_or_else(|| {
                TonvaultError::Internal(format!("balance overflow for wallet {wallet_id}"))
            })?;
        self.supply.record_deposit(token, amount)?;
        self.balances.insert(key, updated);

        tracing::debug!(wallet = %wallet_id, token, %amount, new_balance = %updated, "Deposit");
        Ok(updated)
    }

    /// Withdraw `amount` of `token` from a wallet. Returns the resulting
    /// balance. No overdraft is ever permitted — this is the single
    /// enforcement point for balance non-negativity.
    ///
    /// # Errors
    /// - [`TonvaultError::InvalidAmount`] if `amount <= 0`
    /// - [`TonvaultError::InsufficientBalance`] if the row is absent or
    ///   holds less than `amount`; the balance is unchanged
    pub fn withdraw(
        &mut self,
        wallet_id: WalletId,
        token: &str,
        amount: Decimal,
    ) -> Result<Decimal> {
        if amount <= Decimal::ZERO {
            return Err(TonvaultError::InvalidAmount(amount));
        }

        let entry = self
            .balances
            .get_mut(&(wallet_id, token.to_string()))
            .ok_or(TonvaultError::InsufficientBalance {
                needed: amount,
                available: Decimal::ZERO,
            })?;

        if *entry < amount {
            return Err(TonvaultError::InsufficientBalance {
                needed: amount,
                available: *entry,
            });
        }

        self.supply.record_withdrawal(token, amount)?;
        *entry -= amount;

        tracing::debug!(wallet = %wallet_id, token, %amount, new_balance = %entry, "Withdraw");
        Ok(*entry)
    }

    /// Move `amount` of `token` between two wallets as one unit.
    ///
    /// Conservation-neutral: funds change hands but total supply is
    /// untouched, so nothing is recorded as a deposit or withdrawal.
    /// The source check runs before any mutation — on failure neither
    /// row changes.
    ///
    /// # Errors
    /// Same as [`Ledger::withdraw`] for the source side.
    pub fn transfer(
        &mut self,
        from: WalletId,
        to: WalletId,
        token: &str,
        amount: Decimal,
    ) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(TonvaultError::InvalidAmount(amount));
        }

        if from == to {
            // A self-transfer moves nothing; only the funds check applies.
            let available = self.balance(from, token);
            if available < amount {
                return Err(TonvaultError::InsufficientBalance {
                    needed: amount,
                    available,
                });
            }
            return Ok(());
        }

        let destination = self
            .balances
            .get(&(to, token.to_string()))
            .copied()
            .unwrap_or(Decimal::ZERO)
            .checked_add(amount)
            .ok_or_else(|| TonvaultError::Internal(format!("balance overflow for wallet {to}")))?;
        let source = self
            .balances
            .get_mut(&(from, token.to_string()))
            .ok_or(TonvaultError::InsufficientBalance {
                needed: amount,
                available: Decimal::ZERO,
            })?;
        if *source < amount {
            return Err(TonvaultError::InsufficientBalance {
                needed: amount,
                available: *source,
            });
        }

        *source -= amount;
        self.balances.insert((to, token.to_string()), destination);

        tracing::debug!(%from, %to, token, %amount, "Transfer");
        Ok(())
    }

    /// Balance of a (wallet, token) pair. Absent rows read as zero.
    #[must_use]
    pub fn balance(&self, wallet_id: WalletId, token: &str) -> Decimal {
        self.balances
            .get(&(wallet_id, token.to_string()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Total supply of a token across all wallets.
    #[must_use]
    pub fn total_supply(&self, token: &str) -> Decimal {
        self.balances
            .iter()
            .filter(|((_, t), _)| t == token)
            .map(|(_, amount)| *amount)
            .sum()
    }

    /// Point-in-time view of every balance row.
    #[must_use]
    pub fn snapshot(&self) -> Vec<BalanceSnapshot> {
        self.balances
            .iter()
            .map(|((wallet_id, token), amount)| BalanceSnapshot {
                wallet_id: *wallet_id,
                token: token.clone(),
                amount: *amount,
            })
            .collect()
    }

    /// Verify supply conservation for a token: the sum of all balances
    /// must equal deposits minus withdrawals.
    ///
    /// # Errors
    /// Returns [`TonvaultError::SupplyInvariantViolation`] on mismatch.
    pub fn verify_supply(&self, token: &str) -> Result<()> {
        self.supply.verify(token, self.total_supply(token))
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
