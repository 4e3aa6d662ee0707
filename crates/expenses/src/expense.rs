use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use fairsplit_core::{Decimal, DomainError, DomainResult, ExpenseRule, Money, Person, Precision};

use crate::split::{self, ShareMapping};

/// Beneficiary -> weight, in the order the weights were given.
pub type Weights = IndexMap<Person, Decimal>;

/// Currency tag used when a record does not name one.
pub const DEFAULT_CURRENCY: &str = "USD";

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// Unvalidated expense fields, as collected from a document or a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExpense {
    pub description: String,
    pub amount: Money,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub payer: Person,
    pub beneficiaries: Vec<Person>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<Weights>,
}

/// A shared expense (immutable once constructed).
///
/// Beneficiary order is significant: the equal split hands leftover cents out
/// in this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NewExpense", into = "NewExpense")]
pub struct Expense {
    description: String,
    amount: Money,
    currency: String,
    payer: Person,
    beneficiaries: Vec<Person>,
    weights: Option<Weights>,
}

impl Expense {
    /// Validate and build an expense. Fails with `InvalidExpense` naming the rule.
    pub fn new(draft: NewExpense) -> DomainResult<Self> {
        check_rules(draft.amount, &draft.beneficiaries, draft.weights.as_ref())?;

        Ok(Self {
            description: draft.description,
            amount: draft.amount,
            currency: draft.currency,
            payer: draft.payer,
            beneficiaries: draft.beneficiaries,
            weights: draft.weights,
        })
    }

    /// Equal split with the default currency.
    pub fn equal(
        description: impl Into<String>,
        amount: Money,
        payer: Person,
        beneficiaries: Vec<Person>,
    ) -> DomainResult<Self> {
        Self::new(NewExpense {
            description: description.into(),
            amount,
            currency: default_currency(),
            payer,
            beneficiaries,
            weights: None,
        })
    }

    /// Weighted split with the default currency; beneficiaries follow the weight order.
    pub fn weighted(
        description: impl Into<String>,
        amount: Money,
        payer: Person,
        weights: Weights,
    ) -> DomainResult<Self> {
        Self::new(NewExpense {
            description: description.into(),
            amount,
            currency: default_currency(),
            payer,
            beneficiaries: weights.keys().cloned().collect(),
            weights: Some(weights),
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn payer(&self) -> &Person {
        &self.payer
    }

    pub fn beneficiaries(&self) -> &[Person] {
        &self.beneficiaries
    }

    pub fn weights(&self) -> Option<&Weights> {
        self.weights.as_ref()
    }

    /// Re-check the construction rules.
    pub fn validate(&self) -> DomainResult<()> {
        check_rules(self.amount, &self.beneficiaries, self.weights.as_ref())
    }

    /// Shares owed by each beneficiary; see [`split::split`].
    pub fn split(&self, precision: &Precision) -> DomainResult<ShareMapping> {
        split::split(self, precision)
    }
}

impl TryFrom<NewExpense> for Expense {
    type Error = DomainError;

    fn try_from(value: NewExpense) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Expense> for NewExpense {
    fn from(value: Expense) -> Self {
        Self {
            description: value.description,
            amount: value.amount,
            currency: value.currency,
            payer: value.payer,
            beneficiaries: value.beneficiaries,
            weights: value.weights,
        }
    }
}

fn check_rules(
    amount: Money,
    beneficiaries: &[Person],
    weights: Option<&Weights>,
) -> DomainResult<()> {
    if !amount.is_positive() {
        return Err(ExpenseRule::NonPositiveAmount.into());
    }
    if beneficiaries.is_empty() {
        return Err(ExpenseRule::NoBeneficiaries.into());
    }
    for (i, b) in beneficiaries.iter().enumerate() {
        if beneficiaries[..i].contains(b) {
            return Err(ExpenseRule::DuplicateBeneficiary(b.to_string()).into());
        }
    }

    if let Some(weights) = weights {
        // Beneficiaries are distinct here, so equal length + containment is set equality.
        if weights.len() != beneficiaries.len()
            || !beneficiaries.iter().all(|b| weights.contains_key(b))
        {
            return Err(ExpenseRule::WeightSetMismatch.into());
        }
        if let Some((person, _)) = weights.iter().find(|(_, w)| **w <= Decimal::ZERO) {
            return Err(ExpenseRule::NonPositiveWeight(person.to_string()).into());
        }
    }

    Ok(())
}
