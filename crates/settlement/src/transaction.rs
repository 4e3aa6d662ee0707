use serde::{Deserialize, Serialize};

use fairsplit_core::{DomainError, DomainResult, Money, Person, Precision};
use fairsplit_ledger::Balances;

/// Unvalidated transaction fields, as read from a document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransactionRecord {
    pub payer: Person,
    pub payee: Person,
    pub amount: Money,
}

/// A single peer-to-peer payment: `payer` sends `amount` to `payee`.
///
/// Payer and payee always differ and the amount is strictly positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord")]
pub struct Transaction {
    payer: Person,
    payee: Person,
    amount: Money,
}

impl Transaction {
    pub fn new(payer: Person, payee: Person, amount: Money) -> DomainResult<Self> {
        if payer == payee {
            return Err(DomainError::invalid_transaction(format!(
                "`{payer}` cannot pay themselves"
            )));
        }
        if !amount.is_positive() {
            return Err(DomainError::invalid_transaction(format!(
                "amount must be positive, got {amount}"
            )));
        }
        Ok(Self {
            payer,
            payee,
            amount,
        })
    }

    pub fn payer(&self) -> &Person {
        &self.payer
    }

    pub fn payee(&self) -> &Person {
        &self.payee
    }

    pub fn amount(&self) -> Money {
        self.amount
    }
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = DomainError;

    fn try_from(raw: TransactionRecord) -> Result<Self, Self::Error> {
        Self::new(raw.payer, raw.payee, raw.amount)
    }
}

/// Ordered payments that settle a set of balances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    transactions: Vec<Transaction>,
}

impl Settlement {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Sum of all transferred amounts.
    pub fn total(&self) -> DomainResult<Money> {
        Money::try_sum(self.transactions.iter().map(Transaction::amount))
    }

    /// Balances after every payment has been made.
    pub fn apply_to(&self, balances: &Balances, precision: &Precision) -> DomainResult<Balances> {
        let mut after = balances.clone();
        for tx in &self.transactions {
            after.record_payment(tx.payer(), tx.payee(), tx.amount(), precision)?;
        }
        Ok(after)
    }
}

impl<'a> IntoIterator for &'a Settlement {
    type Item = &'a Transaction;
    type IntoIter = core::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}
