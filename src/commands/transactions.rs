// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use chrono::Local;
use serde::Serialize;

use super::viewed_month;
use crate::models::{Frequency, NewTransaction, Transaction, TxnId, TxnType};
use crate::query::{filter_by_type, month_transactions};
use crate::recurrence::{
    Change, Patch, Prompt, Scope, add_transaction, delete_transaction, edit_transaction,
    toggle_paid, toggle_skipped,
};
use crate::schedule::year_end;
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_date, pretty_table};

pub fn add(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    let Some((kind, sub)) = m.subcommand() else {
        return Ok(());
    };
    let view = viewed_month(sub)?;
    let desc = sub.get_one::<String>("desc").unwrap().trim().to_string();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap());
    let frequency = Frequency::from(sub.get_one::<String>("frequency").unwrap().as_str());
    let due = match sub.get_one::<String>("due") {
        Some(s) => parse_date(s)?,
        None => Local::now().date_naive(),
    };
    if frequency.is_recurring() && due > year_end(view.year) {
        bail!(
            "Due date {} is past the end of {}; use --month in that year",
            due,
            view.year
        );
    }

    let new = match kind {
        "income" => NewTransaction::income(desc.clone(), amount, due, frequency),
        "expense" => {
            let category = sub.get_one::<String>("category").unwrap().trim();
            NewTransaction::expense(desc.clone(), amount, category, due, frequency)
        }
        _ => return Ok(()),
    };

    let added = add_transaction(store, view, new);
    if frequency.is_recurring() {
        println!(
            "Scheduled {} '{}' {} x{} ({}) starting {}",
            kind,
            desc,
            fmt_money(&amount),
            added.occurrences,
            frequency,
            due
        );
    } else {
        println!(
            "Recorded {} '{}' {} due {} (id {})",
            kind,
            desc,
            fmt_money(&amount),
            due,
            added.seed
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub due: String,
    pub r#type: String,
    pub description: String,
    pub category: String,
    pub amount: String,
    pub frequency: String,
    pub status: String,
    pub series: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id.0,
            due: t.due_date.to_string(),
            r#type: t.txn_type().to_string(),
            description: t.description.clone(),
            category: t.kind.category().unwrap_or_default().to_string(),
            amount: format!("{:.2}", t.amount),
            frequency: t.frequency.to_string(),
            status: t.status.as_str().to_string(),
            series: t.series().map(|s| s.to_string()).unwrap_or_default(),
        }
    }
}

pub fn query_rows(store: &Store, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let view = viewed_month(sub)?;
    let mut txns = match sub.get_one::<String>("type") {
        Some(t) => filter_by_type(store, t.parse::<TxnType>()?, view),
        None => month_transactions(store, view),
    };
    txns.sort_by(|a, b| a.due_date.cmp(&b.due_date).then(a.id.cmp(&b.id)));
    Ok(txns.iter().map(TransactionRow::from).collect())
}

pub fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.due.clone(),
                    r.r#type.clone(),
                    r.description.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.frequency.clone(),
                    r.status.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Due", "Type", "Description", "Category", "Amount", "Frequency", "Status"],
                rows,
            )
        );
    }
    Ok(())
}

fn scope_flag(sub: &clap::ArgMatches) -> Scope {
    if sub.get_flag("all-future") {
        Scope::AllFutureOccurrences
    } else {
        Scope::SingleOccurrence
    }
}

fn report(change: Change, verb: &str, id: TxnId) {
    match change {
        Change::Applied(n) => println!("{} {} transaction(s)", verb, n),
        Change::Cancelled => println!("Cancelled"),
        Change::NotFound => println!("No transaction {} in that month", id),
    }
}

pub fn edit(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let view = viewed_month(sub)?;
    let id = TxnId(*sub.get_one::<i64>("id").unwrap());
    let due_date = match sub.get_one::<String>("due") {
        Some(s) => Some(parse_date(s)?),
        None => None,
    };
    let patch = Patch {
        description: sub.get_one::<String>("desc").map(|s| s.trim().to_string()),
        amount: sub.get_one::<String>("amount").cloned(),
        category: sub.get_one::<String>("category").map(|s| s.trim().to_string()),
        due_date,
    };
    let mut scope = scope_flag(sub);
    let change = edit_transaction(store, view, id, &patch, &mut scope);
    report(change, "Updated", id);
    Ok(())
}

/// Asks on the terminal unless `--yes` was given.
struct TerminalPrompt {
    assume_yes: bool,
    scope: Scope,
}

impl Prompt for TerminalPrompt {
    fn confirm(&mut self, txn: &Transaction) -> bool {
        if self.assume_yes {
            return true;
        }
        let question = match (txn.series(), self.scope) {
            (Some(_), Scope::AllFutureOccurrences) => format!(
                "Delete '{}' and all later occurrences? [y/N] ",
                txn.description
            ),
            _ => format!("Delete '{}' due {}? [y/N] ", txn.description, txn.due_date),
        };
        ask(&question).unwrap_or(false)
    }

    fn scope(&mut self, _txn: &Transaction) -> Scope {
        self.scope
    }
}

fn ask(question: &str) -> Result<bool> {
    print!("{}", question);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read answer")?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}

pub fn delete(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let view = viewed_month(sub)?;
    let id = TxnId(*sub.get_one::<i64>("id").unwrap());
    let mut prompt = TerminalPrompt {
        assume_yes: sub.get_flag("yes"),
        scope: scope_flag(sub),
    };
    let change = delete_transaction(store, view, id, &mut prompt);
    report(change, "Deleted", id);
    Ok(())
}

pub fn pay(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let view = viewed_month(sub)?;
    let id = TxnId(*sub.get_one::<i64>("id").unwrap());
    report(toggle_paid(store, view, id), "Toggled paid on", id);
    Ok(())
}

pub fn skip(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let view = viewed_month(sub)?;
    let id = TxnId(*sub.get_one::<i64>("id").unwrap());
    report(toggle_skipped(store, view, id), "Toggled skipped on", id);
    Ok(())
}
