//! Balance engine: expenses -> per-person net positions.
//!
//! Positive balance => creditor (others owe them).
//! Negative balance => debtor (they owe others).

use indexmap::IndexMap;
use serde::Serialize;

use fairsplit_core::{DomainResult, Money, Person, Precision};
use fairsplit_expenses::Expense;

/// Person -> signed balance.
///
/// Iteration order is the order people were first seen: the `people` list
/// passed to [`compute_balances`], then any payer or beneficiary missing from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Balances(IndexMap<Person, Money>);

impl Balances {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every person starts at zero (quantized, so it renders as `0.00`).
    pub fn zeroed<'a>(people: impl IntoIterator<Item = &'a Person>, precision: &Precision) -> Self {
        let zero = Money::ZERO.quantize(precision);
        Self(people.into_iter().map(|p| (p.clone(), zero)).collect())
    }

    pub fn get(&self, person: &str) -> Option<Money> {
        self.0.get(person).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Person, &Money)> {
        self.0.iter()
    }

    pub fn people(&self) -> impl Iterator<Item = &Person> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all balances; fails with `InvalidAmount` if it overflows.
    pub fn total(&self) -> DomainResult<Money> {
        Money::try_sum(self.0.values().copied())
    }

    /// Whether every balance is exactly zero.
    pub fn is_settled(&self) -> bool {
        self.0.values().all(|b| b.is_zero())
    }

    /// People with a positive balance and what they are owed.
    pub fn creditors(&self) -> impl Iterator<Item = (&Person, Money)> {
        self.0
            .iter()
            .filter(|(_, b)| b.is_positive())
            .map(|(p, b)| (p, *b))
    }

    /// People with a negative balance and the (positive) amount they owe.
    pub fn debtors(&self) -> impl Iterator<Item = (&Person, Money)> {
        self.0
            .iter()
            .filter(|(_, b)| b.is_negative())
            .map(|(p, b)| (p, b.abs()))
    }

    /// Add `delta` to a person's balance, quantizing the result.
    pub fn adjust(
        &mut self,
        person: &Person,
        delta: Money,
        precision: &Precision,
    ) -> DomainResult<()> {
        let slot = self.0.entry(person.clone()).or_insert(Money::ZERO);
        *slot = slot.checked_add(delta)?.quantize(precision);
        Ok(())
    }

    /// Record `payer` handing `amount` to `payee`.
    ///
    /// The payer's balance moves up (they owe less) and the payee's moves down.
    pub fn record_payment(
        &mut self,
        payer: &Person,
        payee: &Person,
        amount: Money,
        precision: &Precision,
    ) -> DomainResult<()> {
        self.adjust(payer, amount, precision)?;
        self.adjust(payee, -amount, precision)
    }

    pub fn into_inner(self) -> IndexMap<Person, Money> {
        self.0
    }
}

impl FromIterator<(Person, Money)> for Balances {
    fn from_iter<I: IntoIterator<Item = (Person, Money)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Balances {
    type Item = (&'a Person, &'a Money);
    type IntoIter = indexmap::map::Iter<'a, Person, Money>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Compute every person's net balance over `expenses`, in order.
///
/// The payer is credited the full amount and each beneficiary debited their
/// share from [`fairsplit_expenses::split`], quantizing after every step. If
/// the balances still do not sum to zero, the residual is removed from the
/// person whose name sorts first.
pub fn compute_balances(
    people: &[Person],
    expenses: &[Expense],
    precision: &Precision,
) -> DomainResult<Balances> {
    let mut balances = Balances::zeroed(people, precision);

    for expense in expenses {
        let shares = expense.split(precision)?;
        balances.adjust(expense.payer(), expense.amount(), precision)?;
        for (beneficiary, share) in &shares {
            balances.adjust(beneficiary, -*share, precision)?;
        }
    }

    let drift = balances.total()?.quantize(precision);
    if !drift.is_zero() {
        if let Some(first) = balances.people().min().cloned() {
            balances.adjust(&first, -drift, precision)?;
        }
    }

    Ok(balances)
}
