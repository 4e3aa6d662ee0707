//! FairSplit JSON documents.
//!
//! ```json
//! {
//!   "people": ["A", "B", "C"],
//!   "expenses": [
//!     {"desc": "dinner", "amount": "90.00", "paid_by": "A", "for": ["A", "B", "C"]},
//!     {"desc": "taxi", "amount": 30, "currency": "EUR", "paid_by": "B", "for": ["B", "C"],
//!      "weights": {"B": 1, "C": "2.5"}}
//!   ]
//! }
//! ```
//!
//! Records are only shaped here; validation lives in the domain types.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use fairsplit_core::{Decimal, DomainResult, Money, Person, parse_decimal};
use fairsplit_expenses::{Expense, NewExpense, Weights};

use crate::error::{InfraError, InfraResult};
use crate::people::normalize_people;

/// A numeric field kept as its literal JSON text.
///
/// Accepts either a JSON string (`"12.50"`) or a JSON number (`12.5`); both are
/// parsed from text, so values never pass through `f64`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NumericText(Box<RawValue>);

impl NumericText {
    /// Encode as a JSON string, the form `dump_document` writes.
    pub fn from_decimal(value: Decimal) -> InfraResult<Self> {
        Ok(Self(serde_json::value::to_raw_value(&value.to_string())?))
    }

    pub fn to_decimal(&self) -> DomainResult<Decimal> {
        let raw = self.0.get().trim();
        match serde_json::from_str::<String>(raw) {
            Ok(text) => parse_decimal(&text),
            Err(_) => parse_decimal(raw),
        }
    }
}

/// One expense as stored in a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    #[serde(default)]
    pub desc: String,
    pub amount: NumericText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub paid_by: String,
    #[serde(rename = "for")]
    pub beneficiaries: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<IndexMap<String, NumericText>>,
}

impl ExpenseRecord {
    pub fn from_expense(expense: &Expense) -> InfraResult<Self> {
        let weights = expense
            .weights()
            .map(|ws| {
                ws.iter()
                    .map(|(p, w)| Ok((p.to_string(), NumericText::from_decimal(*w)?)))
                    .collect::<InfraResult<IndexMap<_, _>>>()
            })
            .transpose()?;

        Ok(Self {
            desc: expense.description().to_string(),
            amount: NumericText::from_decimal(expense.amount().amount())?,
            currency: Some(expense.currency().to_string()),
            paid_by: expense.payer().to_string(),
            beneficiaries: expense.beneficiaries().iter().map(Person::to_string).collect(),
            weights,
        })
    }

    /// Validate into a domain expense; `default_currency` fills a missing tag.
    pub fn to_expense(&self, default_currency: &str) -> DomainResult<Expense> {
        let weights = self
            .weights
            .as_ref()
            .map(|ws| {
                ws.iter()
                    .map(|(name, w)| Ok((Person::new(name)?, w.to_decimal()?)))
                    .collect::<DomainResult<Weights>>()
            })
            .transpose()?;

        Expense::new(NewExpense {
            description: self.desc.clone(),
            amount: Money::new(self.amount.to_decimal()?),
            currency: self
                .currency
                .clone()
                .unwrap_or_else(|| default_currency.to_string()),
            payer: Person::new(&self.paid_by)?,
            beneficiaries: self
                .beneficiaries
                .iter()
                .map(Person::new)
                .collect::<DomainResult<Vec<_>>>()?,
            weights,
        })
    }
}

/// Top-level document: people plus expenses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub people: Vec<String>,
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
}

impl Document {
    pub fn from_json_str(json: &str) -> InfraResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_domain(people: &[Person], expenses: &[Expense]) -> InfraResult<Self> {
        Ok(Self {
            people: people.iter().map(Person::to_string).collect(),
            expenses: expenses
                .iter()
                .map(ExpenseRecord::from_expense)
                .collect::<InfraResult<Vec<_>>>()?,
        })
    }

    /// Normalized people (trimmed, deduplicated, sorted).
    pub fn people(&self) -> Vec<Person> {
        normalize_people(&self.people)
    }

    /// Validate every expense record, reporting the first failing index.
    pub fn expenses(&self, default_currency: &str) -> InfraResult<Vec<Expense>> {
        self.expenses
            .iter()
            .enumerate()
            .map(|(index, record)| {
                record
                    .to_expense(default_currency)
                    .map_err(|source| InfraError::Record { index, source })
            })
            .collect()
    }

    pub fn into_domain(self, default_currency: &str) -> InfraResult<(Vec<Person>, Vec<Expense>)> {
        let expenses = self.expenses(default_currency)?;
        Ok((self.people(), expenses))
    }
}

/// Read and parse a document from disk.
pub fn load_document(path: impl AsRef<Path>) -> InfraResult<Document> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| InfraError::io(path, e))?;
    let document = Document::from_json_str(&text)?;

    tracing::debug!(
        path = %path.display(),
        people = document.people.len(),
        expenses = document.expenses.len(),
        "loaded document"
    );
    Ok(document)
}

/// Write people and expenses to disk as pretty-printed JSON.
pub fn dump_document(
    path: impl AsRef<Path>,
    people: &[Person],
    expenses: &[Expense],
) -> InfraResult<()> {
    let path = path.as_ref();
    let document = Document::from_domain(people, expenses)?;
    let json = serde_json::to_string_pretty(&document)?;
    std::fs::write(path, json).map_err(|e| InfraError::io(path, e))?;

    tracing::debug!(
        path = %path.display(),
        people = people.len(),
        expenses = expenses.len(),
        "wrote document"
    );
    Ok(())
}
