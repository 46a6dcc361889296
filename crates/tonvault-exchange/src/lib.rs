//! # tonvault-exchange
//!
//! Wallet registry, order store, and the two-party fill routine.
//!
//! An order is a standing offer filled in whole against exactly one taker
//! at the maker's price — no order book, no partial fills, no price
//! discovery. Settlement drives the ledger: every fill is one atomic unit,
//! and a failed fill leaves both balances and the order untouched.

pub mod exchange;

pub use exchange::Exchange;
