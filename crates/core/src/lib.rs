//! `fairsplit-core` — money, people and the domain error model.
//!
//! This crate contains **pure domain** primitives (no IO, no logging).

pub mod error;
pub mod money;
pub mod person;

pub use error::{DomainError, DomainResult, ExpenseRule};
pub use money::{Money, Precision, Primitive, parse_decimal};
pub use person::Person;

/// Re-exported so downstream crates agree on the decimal type.
pub use rust_decimal::Decimal;
