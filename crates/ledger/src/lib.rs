//! Ledger module: per-person balances accumulated over a run's expenses.
//!
//! Pure domain logic only: no IO, no logging.

pub mod balances;

pub use balances::{Balances, compute_balances};
