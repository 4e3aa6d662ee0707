//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is raised synchronously at the point of construction or
/// validation and is never retried. Presentation concerns (messages, exit
/// codes) belong to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A person name was empty or all whitespace.
    #[error("invalid person: {0}")]
    InvalidPerson(String),

    /// An expense violated one of its construction rules.
    #[error("invalid expense: {0}")]
    InvalidExpense(ExpenseRule),

    /// A settlement step would produce a self-payment or a non-positive amount.
    ///
    /// The optimizer never builds such a transaction from well-formed balances,
    /// so seeing this from `optimize` means an internal invariant broke.
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    /// Numeric text could not be parsed as an exact decimal.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}

/// The expense rule that failed validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExpenseRule {
    #[error("amount must be positive")]
    NonPositiveAmount,

    #[error("expense must have at least one beneficiary")]
    NoBeneficiaries,

    #[error("beneficiary `{0}` is listed more than once")]
    DuplicateBeneficiary(String),

    #[error("weights must be provided for exactly the beneficiaries")]
    WeightSetMismatch,

    #[error("weight for `{0}` must be positive")]
    NonPositiveWeight(String),
}

impl DomainError {
    pub fn invalid_person(msg: impl Into<String>) -> Self {
        Self::InvalidPerson(msg.into())
    }

    pub fn invalid_transaction(msg: impl Into<String>) -> Self {
        Self::InvalidTransaction(msg.into())
    }

    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::InvalidAmount(msg.into())
    }

    /// Whether this error signals a programming error rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::InvalidTransaction(_))
    }
}

impl From<ExpenseRule> for DomainError {
    fn from(rule: ExpenseRule) -> Self {
        Self::InvalidExpense(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expense_errors_name_the_violated_rule() {
        let err = DomainError::from(ExpenseRule::NonPositiveWeight("Bob".into()));
        assert_eq!(
            err.to_string(),
            "invalid expense: weight for `Bob` must be positive"
        );
    }

    #[test]
    fn only_transaction_errors_are_internal() {
        assert!(DomainError::invalid_transaction("self payment").is_internal());
        assert!(!DomainError::invalid_amount("abc").is_internal());
        assert!(!DomainError::invalid_person("").is_internal());
        assert!(!DomainError::from(ExpenseRule::NoBeneficiaries).is_internal());
    }
}
