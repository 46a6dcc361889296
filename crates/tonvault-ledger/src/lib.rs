//! # tonvault-ledger
//!
//! The authoritative store of per-(wallet, token) balances.
//!
//! The ledger is the single invariant-enforcement point for the whole
//! system: no balance ever goes negative, and every mutation is confined
//! to the rows it names — a failed call leaves every balance unchanged.
//!
//! [`conservation::SupplyConservation`] is the safety net on top: after
//! any sequence of operations, the sum of all balances of a token must
//! equal its deposits minus its withdrawals.

pub mod conservation;
pub mod ledger;

pub use conservation::SupplyConservation;
pub use ledger::Ledger;
