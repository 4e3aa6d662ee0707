//! Command handlers.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use fairsplit_core::{DomainResult, Person, Precision};
use fairsplit_expenses::Expense;
use fairsplit_infra::{AppConfig, dump_document, load_document, normalize_people};
use fairsplit_ledger::{Balances, compute_balances};
use fairsplit_settlement::{Transaction, optimize};

use crate::cli::OutputFormat;
use crate::render::{balances_table, settlement_table};
use crate::wizard::{self, Prompter};

/// Balances plus, unless optimization was skipped, the settling payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub balances: Balances,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<Transaction>>,
}

impl Report {
    pub fn build(
        people: &[Person],
        expenses: &[Expense],
        optimize_settlement: bool,
        precision: &Precision,
    ) -> DomainResult<Self> {
        let balances = compute_balances(people, expenses, precision)?;
        let transactions = if optimize_settlement {
            Some(optimize(&balances, precision)?.transactions().to_vec())
        } else {
            None
        };
        Ok(Self {
            balances,
            transactions,
        })
    }

    pub fn write_to<W: Write>(&self, out: &mut W, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Table => {
                write!(out, "{}", balances_table(&self.balances))?;
                if let Some(transactions) = &self.transactions {
                    writeln!(out)?;
                    write!(out, "{}", settlement_table(transactions))?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, self)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }
}

/// Load a document, validate its expenses and write balances (and, unless
/// `no_optimize`, the settling payments) to `out` in the chosen format.
pub fn run_file<W: Write>(
    input: &Path,
    no_optimize: bool,
    format: OutputFormat,
    config: &AppConfig,
    out: &mut W,
) -> Result<()> {
    let document = load_document(input)?;
    let (people, expenses) = document
        .into_domain(&config.default_currency)
        .with_context(|| format!("invalid document {}", input.display()))?;

    let report = Report::build(&people, &expenses, !no_optimize, &Precision::CENTS)?;
    tracing::info!(
        input = %input.display(),
        people = report.balances.len(),
        expenses = expenses.len(),
        transactions = report.transactions.as_ref().map_or(0, Vec::len),
        "computed settlement"
    );

    report.write_to(out, format)
}

/// Collect people and expenses from `input`, print the resulting balances and
/// settlement as tables, and optionally save the data as a document.
pub fn run_wizard<R: BufRead, W: Write>(
    save: Option<&Path>,
    config: &AppConfig,
    input: R,
    out: &mut W,
) -> Result<()> {
    let session = {
        let mut prompter = Prompter::new(input, &mut *out);
        wizard::collect(&mut prompter, &config.default_currency)?
    };
    let people = normalize_people(&session.people);

    let report = Report::build(&people, &session.expenses, true, &Precision::CENTS)?;
    tracing::info!(
        people = people.len(),
        expenses = session.expenses.len(),
        "wizard finished"
    );
    writeln!(out)?;
    report.write_to(out, OutputFormat::Table)?;

    if let Some(path) = save {
        dump_document(path, &people, &session.expenses)?;
        writeln!(out, "Saved to {}", path.display())?;
    }
    Ok(())
}
