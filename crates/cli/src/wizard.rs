//! Interactive collection of people and expenses.

use std::fmt::Display;
use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};

use fairsplit_core::{Decimal, Money, Person, parse_decimal};
use fairsplit_expenses::{Expense, NewExpense, Weights};

/// Line-oriented prompts over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Ask once and return the trimmed answer. Fails if input ends.
    pub fn ask(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .with_context(|| format!("failed to read answer to `{label}`"))?;
        if read == 0 {
            bail!("input ended while waiting for `{label}`");
        }
        Ok(line.trim().to_string())
    }

    /// Ask until `parse` accepts the answer.
    pub fn ask_with<T, E, F>(&mut self, label: &str, parse: F) -> Result<T>
    where
        E: Display,
        F: Fn(&str) -> Result<T, E>,
    {
        loop {
            let answer = self.ask(label)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => writeln!(self.output, "  invalid value: {e}")?,
            }
        }
    }

    pub fn ask_parsed<T>(&mut self, label: &str) -> Result<T>
    where
        T: std::str::FromStr,
        T::Err: Display,
    {
        self.ask_with(label, str::parse::<T>)
    }

    /// Yes/no question; an empty answer picks `default`.
    pub fn confirm(&mut self, label: &str, default: bool) -> Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        self.ask_with(&format!("{label} [{hint}]"), |answer| {
            match answer.to_ascii_lowercase().as_str() {
                "" => Ok(default),
                "y" | "yes" => Ok(true),
                "n" | "no" => Ok(false),
                _ => Err("please answer y or n"),
            }
        })
    }

    pub fn rule(&mut self, title: &str) -> Result<()> {
        writeln!(self.output, "---- {title} ----")?;
        Ok(())
    }
}

/// What the wizard collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub people: Vec<Person>,
    pub expenses: Vec<Expense>,
}

/// Walk the user through people and expenses.
///
/// Malformed numbers and names are re-asked; an expense that fails validation
/// is reported and collected again from the start.
pub fn collect<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    currency: &str,
) -> Result<Session> {
    prompter.rule("Interactive Wizard")?;

    let people_count: usize = prompter.ask_parsed("How many people?")?;
    let mut people = Vec::new();
    for i in 0..people_count {
        people.push(prompter.ask_parsed::<Person>(&format!("Person #{} name", i + 1))?);
    }

    let expense_count: usize = prompter.ask_parsed("How many expenses?")?;
    let mut expenses = Vec::new();

    for i in 0..expense_count {
        loop {
            prompter.rule(&format!("Expense #{}", i + 1))?;
            let draft = collect_expense(prompter, currency)?;
            match Expense::new(draft) {
                Ok(expense) => {
                    expenses.push(expense);
                    break;
                }
                Err(e) => {
                    tracing::debug!(error = %e, expense = i + 1, "wizard expense rejected");
                    writeln!(prompter.output(), "  expense rejected: {e}")?;
                }
            }
        }
    }

    Ok(Session { people, expenses })
}

fn collect_expense<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    currency: &str,
) -> Result<NewExpense> {
    let description = prompter.ask("Description")?;
    let amount: Money = prompter.ask_parsed("Amount (e.g., 120.00)")?;
    let payer: Person = prompter.ask_parsed("Paid by (name)")?;

    let beneficiaries: Vec<Person> = prompter
        .ask("Beneficiaries (comma-separated names)")?
        .split(',')
        .filter_map(|name| Person::new(name).ok())
        .collect();

    let weights = if prompter.confirm("Weighted split?", false)? {
        let mut weights = Weights::new();
        for b in &beneficiaries {
            let w: Decimal =
                prompter.ask_with(&format!("Weight for {b} (e.g., 1, 2, 0.5)"), parse_decimal)?;
            weights.insert(b.clone(), w);
        }
        Some(weights)
    } else {
        None
    };

    Ok(NewExpense {
        description,
        amount,
        currency: currency.to_string(),
        payer,
        beneficiaries,
        weights,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn run(script: &str) -> (Result<Session>, String) {
        let mut out = Vec::new();
        let result = {
            let mut prompter = Prompter::new(script.as_bytes(), &mut out);
            collect(&mut prompter, "USD")
        };
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn collects_equal_and_weighted_expenses() {
        let script = "\
2
Ann
Bob
2
dinner
90.00
Ann
Ann, Bob
n
rent
30
Bob
Ann,Bob
y
1
2
";
        let (session, _) = run(script);
        let session = session.unwrap();

        assert_eq!(session.people.len(), 2);
        assert_eq!(session.expenses.len(), 2);
        assert!(session.expenses[0].weights().is_none());

        let weights = session.expenses[1].weights().unwrap();
        assert_eq!(weights.get("Bob"), Some(&dec!(2)));
        assert_eq!(session.expenses[1].currency(), "USD");
    }

    #[test]
    fn invalid_numbers_are_asked_again() {
        let script = "\
two
1
Ann
1
coffee
abc
4.50
Ann
Ann

";
        let (session, transcript) = run(script);
        let session = session.unwrap();
        assert_eq!(session.expenses[0].amount(), Money::new(dec!(4.50)));
        assert_eq!(transcript.matches("invalid value").count(), 2);
    }

    #[test]
    fn rejected_expenses_are_collected_again() {
        let script = "\
1
Ann
1
nothing
0
Ann
Ann
n
lunch
12
Ann
Ann
n
";
        let (session, transcript) = run(script);
        let session = session.unwrap();
        assert_eq!(session.expenses.len(), 1);
        assert_eq!(session.expenses[0].description(), "lunch");
        assert!(transcript.contains("expense rejected: invalid expense: amount must be positive"));
    }

    #[test]
    fn huge_expense_counts_fail_on_end_of_input() {
        let (session, _) = run("1\nAnn\n18446744073709551615\n");
        assert!(session.is_err());
    }

    #[test]
    fn huge_people_counts_fail_on_end_of_input() {
        let (session, _) = run("18446744073709551615\nAnn\n");
        assert!(session.is_err());
    }

    #[test]
    fn running_out_of_input_is_an_error() {
        let (session, _) = run("3\nAnn\n");
        assert!(session.is_err());
    }
}
