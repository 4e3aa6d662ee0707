//! Plain-text tables for terminal output.

use core::fmt;

use fairsplit_ledger::Balances;
use fairsplit_settlement::Transaction;

/// A titled table with left-aligned text columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    title: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(title: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            title: title.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; missing cells render empty, extra cells are dropped.
    pub fn add_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let mut row: Vec<String> = cells
            .into_iter()
            .take(self.headers.len())
            .map(|c| c.to_string())
            .collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                self.rows
                    .iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        let rule: String = widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+");

        writeln!(f, "{}", self.title)?;
        writeln!(f, "+{rule}+")?;
        write_row(f, &self.headers, &widths)?;
        writeln!(f, "+{rule}+")?;
        for row in &self.rows {
            write_row(f, row, &widths)?;
        }
        writeln!(f, "+{rule}+")
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c, &w)| format!(" {c:<w$} "))
        .collect();
    writeln!(f, "|{}|", padded.join("|"))
}

pub fn balances_table(balances: &Balances) -> Table {
    let mut table = Table::new("Balances", &["Person", "Balance"]);
    for (person, balance) in balances {
        table.add_row([person.to_string(), balance.to_string()]);
    }
    table
}

pub fn settlement_table(transactions: &[Transaction]) -> Table {
    let mut table = Table::new("Optimized Settlements", &["Payer", "Payee", "Amount"]);
    for tx in transactions {
        table.add_row([
            tx.payer().to_string(),
            tx.payee().to_string(),
            tx.amount().to_string(),
        ]);
    }
    table
}
