//! Settlement module: transactions and the greedy settlement optimizer.
//!
//! Pure domain logic only: no IO, no logging.

pub mod optimizer;
pub mod transaction;

pub use optimizer::optimize;
pub use transaction::{Settlement, Transaction, TransactionRecord};
