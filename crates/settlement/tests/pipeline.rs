//! End-to-end properties: expenses -> balances -> settlement.

use fairsplit_core::{Decimal, Money, Person, Precision};
use fairsplit_expenses::{Expense, NewExpense, Weights};
use fairsplit_ledger::compute_balances;
use fairsplit_settlement::optimize;
use proptest::prelude::*;
use rust_decimal_macros::dec;

const NAMES: [&str; 6] = ["Ann", "Bob", "Cid", "Dee", "Eve", "Fay"];

fn p(name: &str) -> Person {
    Person::new(name).unwrap()
}

fn group() -> Vec<Person> {
    NAMES.iter().map(|n| p(n)).collect()
}

fn expense_strategy() -> impl Strategy<Value = Expense> {
    (
        1i64..5_000_000i64,
        0usize..NAMES.len(),
        prop::sample::subsequence(NAMES.to_vec(), 1..=NAMES.len()),
        prop::option::of(prop::collection::vec(1i64..1_000i64, NAMES.len())),
    )
        .prop_map(|(cents, payer, beneficiaries, weights)| {
            let beneficiaries: Vec<Person> = beneficiaries.iter().map(|n| p(n)).collect();
            let weights = weights.map(|ws| {
                beneficiaries
                    .iter()
                    .cloned()
                    .zip(ws.into_iter().map(Decimal::from))
                    .collect::<Weights>()
            });
            Expense::new(NewExpense {
                description: "generated".into(),
                amount: Money::new(Decimal::new(cents, 2)),
                currency: "USD".into(),
                payer: p(NAMES[payer]),
                beneficiaries,
                weights,
            })
            .unwrap()
        })
}

#[test]
fn weekend_trip_settles_in_two_payments() {
    let precision = Precision::CENTS;
    let expenses = vec![
        Expense::equal(
            "dinner",
            Money::new(dec!(90.00)),
            p("A"),
            vec![p("A"), p("B"), p("C")],
        )
        .unwrap(),
        Expense::equal("taxi", Money::new(dec!(30.00)), p("B"), vec![p("B"), p("C")]).unwrap(),
    ];

    let balances = compute_balances(&[p("A"), p("B"), p("C")], &expenses, &precision).unwrap();
    let settlement = optimize(&balances, &precision).unwrap();

    assert_eq!(settlement.len(), 2);
    assert_eq!(settlement.total().unwrap(), Money::new(dec!(60.00)));
    assert!(settlement.apply_to(&balances, &precision).unwrap().is_settled());
}

#[test]
fn weighted_rent_settles_exactly() {
    let precision = Precision::CENTS;
    let weights: Weights = [(p("A"), dec!(1)), (p("B"), dec!(1)), (p("C"), dec!(1))]
        .into_iter()
        .collect();
    let rent = Expense::weighted("rent", Money::new(dec!(100.00)), p("A"), weights).unwrap();

    let balances = compute_balances(&[p("A"), p("B"), p("C")], &[rent], &precision).unwrap();
    assert_eq!(balances.get("A"), Some(Money::new(dec!(66.66))));
    assert_eq!(balances.get("B"), Some(Money::new(dec!(-33.33))));

    let settlement = optimize(&balances, &precision).unwrap();
    assert!(settlement.apply_to(&balances, &precision).unwrap().is_settled());
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    })]

    /// Property: any computed balances are fully settled by the optimizer.
    #[test]
    fn computed_balances_always_settle(expenses in prop::collection::vec(expense_strategy(), 0..30)) {
        let precision = Precision::CENTS;
        let balances = compute_balances(&group(), &expenses, &precision).unwrap();
        prop_assert!(balances.total().unwrap().is_zero());

        let settlement = optimize(&balances, &precision).unwrap();
        prop_assert!(settlement.apply_to(&balances, &precision).unwrap().is_settled());

        let parties = balances.creditors().count() + balances.debtors().count();
        prop_assert!(settlement.len() <= parties.saturating_sub(1));
    }
}
