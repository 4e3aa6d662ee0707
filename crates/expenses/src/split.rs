//! Expense split engine: one expense -> what each beneficiary owes.

use indexmap::IndexMap;
use serde::Serialize;

use fairsplit_core::{Decimal, DomainError, DomainResult, ExpenseRule, Money, Person, Precision};

use crate::expense::{Expense, Weights};

/// Beneficiary -> quantized share, in beneficiary order.
///
/// Shares always add up to the quantized expense amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ShareMapping(IndexMap<Person, Money>);

impl ShareMapping {
    pub fn get(&self, person: &str) -> Option<Money> {
        self.0.get(person).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Person, &Money)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> Money {
        self.0.values().sum()
    }

    pub fn into_inner(self) -> IndexMap<Person, Money> {
        self.0
    }
}

impl<'a> IntoIterator for &'a ShareMapping {
    type Item = (&'a Person, &'a Money);
    type IntoIter = indexmap::map::Iter<'a, Person, Money>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Split an expense into per-beneficiary shares.
///
/// - Weighted: `amount * weight / sum(weights)`, each quantized. Any drift goes
///   entirely to the largest share; on ties, the earliest beneficiary.
/// - Equal: `amount / n` quantized, then the drift is handed out one unit at a
///   time in beneficiary order (a negative drift takes units back).
///
/// The amount itself is quantized first; an amount that rounds to zero is
/// rejected as `NonPositiveAmount`.
pub fn split(expense: &Expense, precision: &Precision) -> DomainResult<ShareMapping> {
    expense.validate()?;

    let total = expense.amount().quantize(precision);
    if !total.is_positive() {
        return Err(ExpenseRule::NonPositiveAmount.into());
    }

    let shares = match expense.weights() {
        Some(weights) => split_weighted(total, expense.beneficiaries(), weights, precision)?,
        None => split_equal(total, expense.beneficiaries(), precision)?,
    };

    debug_assert_eq!(shares.total(), total);
    Ok(shares)
}

fn split_weighted(
    total: Money,
    beneficiaries: &[Person],
    weights: &Weights,
    precision: &Precision,
) -> DomainResult<ShareMapping> {
    let weight_sum = weights
        .values()
        .try_fold(Decimal::ZERO, |acc, w| acc.checked_add(*w))
        .ok_or_else(|| DomainError::invalid_amount("sum of weights is too large"))?;

    let mut shares: IndexMap<Person, Money> = beneficiaries
        .iter()
        .filter_map(|b| {
            weights.get(b).map(|w| {
                let raw = total.portion(*w, weight_sum);
                (b.clone(), Money::new(precision.quantize(raw)))
            })
        })
        .collect();

    let drift = total.checked_sub(Money::try_sum(shares.values().copied())?)?;
    if !drift.is_zero() {
        let largest = shares
            .values()
            .enumerate()
            .fold(0, |best, (i, share)| if *share > shares[best] { i } else { best });
        if let Some((_, share)) = shares.get_index_mut(largest) {
            *share = share.checked_add(drift)?.quantize(precision);
        }
    }

    Ok(ShareMapping(shares))
}

fn split_equal(
    total: Money,
    beneficiaries: &[Person],
    precision: &Precision,
) -> DomainResult<ShareMapping> {
    let count = Decimal::from(beneficiaries.len());
    let base = Money::new(precision.quantize(total.portion(Decimal::ONE, count)));

    let mut shares: IndexMap<Person, Money> =
        beneficiaries.iter().map(|b| (b.clone(), base)).collect();

    // Half-up rounding keeps |drift| under n/2 units, so one pass is enough.
    let mut drift = total.checked_sub(Money::try_sum(shares.values().copied())?)?;
    let step = if drift.is_negative() {
        Money::new(-precision.unit())
    } else {
        Money::new(precision.unit())
    };
    for share in shares.values_mut() {
        if drift.is_zero() {
            break;
        }
        *share = share.checked_add(step)?.quantize(precision);
        drift -= step;
    }

    Ok(ShareMapping(shares))
}
