//! Expenses module: the expense value object and the split engine.
//!
//! Pure domain logic only: no IO, no logging.

pub mod expense;
pub mod split;

pub use expense::{DEFAULT_CURRENCY, Expense, NewExpense, Weights};
pub use split::{ShareMapping, split};
