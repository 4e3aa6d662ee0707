//! Settlement optimizer: greedy min-cash-flow over final balances.
//!
//! The largest remaining debtor always pays the largest remaining creditor as
//! much as either side allows. This is a heuristic, not a guaranteed minimum,
//! but it never emits more than `#creditors + #debtors - 1` transactions.

use fairsplit_core::{DomainResult, Money, Person, Precision};
use fairsplit_ledger::Balances;

use crate::transaction::{Settlement, Transaction};

/// One side of the matching with what it still has to give or receive.
#[derive(Debug)]
struct Party<'a> {
    person: &'a Person,
    remaining: Money,
}

/// Compute payments that bring every balance to zero.
///
/// Creditors and debtors are each ranked by amount, largest first, with equal
/// amounts ordered by name. Magnitudes are quantized before matching; anything
/// that rounds to zero is left out. Matching stops as soon as either side is
/// exhausted, so balances that do not sum to zero leave a remainder unsettled.
pub fn optimize(balances: &Balances, precision: &Precision) -> DomainResult<Settlement> {
    let mut creditors = ranked(balances.creditors(), precision);
    let mut debtors = ranked(balances.debtors(), precision);

    let mut transactions = Vec::with_capacity(creditors.len() + debtors.len());
    let (mut d, mut c) = (0, 0);

    while d < debtors.len() && c < creditors.len() {
        let debtor = &mut debtors[d];
        let creditor = &mut creditors[c];

        let pay = debtor.remaining.min(creditor.remaining).quantize(precision);
        if pay.is_positive() {
            transactions.push(Transaction::new(
                debtor.person.clone(),
                creditor.person.clone(),
                pay,
            )?);
        }

        debtor.remaining = (debtor.remaining - pay).quantize(precision);
        creditor.remaining = (creditor.remaining - pay).quantize(precision);

        if debtor.remaining.is_zero() {
            d += 1;
        }
        if creditor.remaining.is_zero() {
            c += 1;
        }
    }

    Ok(Settlement::new(transactions))
}

fn ranked<'a>(
    parties: impl Iterator<Item = (&'a Person, Money)>,
    precision: &Precision,
) -> Vec<Party<'a>> {
    let mut ranked: Vec<Party<'a>> = parties
        .map(|(person, amount)| Party {
            person,
            remaining: amount.quantize(precision),
        })
        .filter(|party| party.remaining.is_positive())
        .collect();

    ranked.sort_by(|a, b| {
        b.remaining
            .cmp(&a.remaining)
            .then_with(|| a.person.cmp(b.person))
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairsplit_core::Decimal;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn p(name: &str) -> Person {
        Person::new(name).unwrap()
    }

    fn balances(entries: &[(&str, Decimal)]) -> Balances {
        entries
            .iter()
            .map(|(name, amount)| (p(name), Money::new(*amount)))
            .collect()
    }

    fn flows(settlement: &Settlement) -> Vec<(String, String, Decimal)> {
        settlement
            .iter()
            .map(|t| (t.payer().to_string(), t.payee().to_string(), t.amount().amount()))
            .collect()
    }

    #[test]
    fn one_creditor_two_debtors() {
        let b = balances(&[("A", dec!(10.00)), ("B", dec!(-6.00)), ("C", dec!(-4.00))]);
        let s = optimize(&b, &Precision::CENTS).unwrap();

        assert_eq!(s.len(), 2);
        assert_eq!(s.total().unwrap(), Money::new(dec!(10.00)));
        assert_eq!(
            flows(&s),
            vec![
                ("B".into(), "A".into(), dec!(6.00)),
                ("C".into(), "A".into(), dec!(4.00)),
            ]
        );
        assert!(s.apply_to(&b, &Precision::CENTS).unwrap().is_settled());
    }

    #[test]
    fn largest_debtor_pays_largest_creditor_first() {
        let b = balances(&[
            ("A", dec!(60.00)),
            ("B", dec!(-15.00)),
            ("C", dec!(-45.00)),
        ]);
        let s = optimize(&b, &Precision::CENTS).unwrap();
        assert_eq!(
            flows(&s),
            vec![
                ("C".into(), "A".into(), dec!(45.00)),
                ("B".into(), "A".into(), dec!(15.00)),
            ]
        );
    }

    #[test]
    fn equal_amounts_are_ordered_by_name() {
        let b = balances(&[
            ("Dee", dec!(-5.00)),
            ("Bob", dec!(5.00)),
            ("Cid", dec!(-5.00)),
            ("Ann", dec!(5.00)),
        ]);
        let s = optimize(&b, &Precision::CENTS).unwrap();
        assert_eq!(
            flows(&s),
            vec![
                ("Cid".into(), "Ann".into(), dec!(5.00)),
                ("Dee".into(), "Bob".into(), dec!(5.00)),
            ]
        );
    }

    #[test]
    fn partial_payments_chain_across_parties() {
        let b = balances(&[
            ("A", dec!(50.00)),
            ("B", dec!(30.00)),
            ("C", dec!(-70.00)),
            ("D", dec!(-10.00)),
        ]);
        let s = optimize(&b, &Precision::CENTS).unwrap();
        assert_eq!(
            flows(&s),
            vec![
                ("C".into(), "A".into(), dec!(50.00)),
                ("C".into(), "B".into(), dec!(20.00)),
                ("D".into(), "B".into(), dec!(10.00)),
            ]
        );
        assert!(s.apply_to(&b, &Precision::CENTS).unwrap().is_settled());
    }

    #[test]
    fn settled_or_empty_balances_need_no_transactions() {
        assert!(optimize(&Balances::new(), &Precision::CENTS).unwrap().is_empty());
        let b = balances(&[("A", dec!(0.00)), ("B", dec!(0))]);
        assert!(optimize(&b, &Precision::CENTS).unwrap().is_empty());
    }

    #[test]
    fn sub_unit_balances_round_away() {
        let b = balances(&[("A", dec!(0.004)), ("B", dec!(-0.004))]);
        assert!(optimize(&b, &Precision::CENTS).unwrap().is_empty());
    }

    #[test]
    fn unbalanced_input_stops_when_one_side_runs_out() {
        let b = balances(&[("A", dec!(10.00)), ("B", dec!(-4.00))]);
        let s = optimize(&b, &Precision::CENTS).unwrap();
        assert_eq!(flows(&s), vec![("B".into(), "A".into(), dec!(4.00))]);
    }

    fn zero_sum_balances() -> impl Strategy<Value = Balances> {
        prop::collection::vec(-1_000_000i64..1_000_000i64, 1..12).prop_map(|cents| {
            let last = -cents.iter().sum::<i64>();
            cents
                .into_iter()
                .chain(std::iter::once(last))
                .enumerate()
                .map(|(i, c)| (p(&format!("P{i:02}")), Money::new(Decimal::new(c, 2))))
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: applying the settlement zeroes every balance, within the
        /// transaction bound, moving exactly what creditors are owed.
        #[test]
        fn settlement_zeroes_zero_sum_balances(b in zero_sum_balances()) {
            let s = optimize(&b, &Precision::CENTS).unwrap();

            prop_assert!(s.apply_to(&b, &Precision::CENTS).unwrap().is_settled());

            let creditors = b.creditors().count();
            let debtors = b.debtors().count();
            prop_assert!(s.len() <= (creditors + debtors).saturating_sub(1));

            let owed: Money = b.creditors().map(|(_, m)| m).sum();
            prop_assert_eq!(s.total().unwrap(), owed);

            for t in &s {
                prop_assert!(t.payer() != t.payee());
                prop_assert!(t.amount().is_positive());
            }
        }

        /// Property: identical balances give identical settlements.
        #[test]
        fn settlement_is_deterministic(b in zero_sum_balances()) {
            prop_assert_eq!(
                optimize(&b, &Precision::CENTS).unwrap(),
                optimize(&b, &Precision::CENTS).unwrap()
            );
        }
    }
}
