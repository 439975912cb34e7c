// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::viewed_month;
use crate::query::{category_breakdown, monthly_summary, payment_summary, totals, trends};
use crate::store::Store;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("totals", sub)) => print_totals(store, sub)?,
        Some(("payments", sub)) => payments(store, sub)?,
        Some(("summary", sub)) => summary(store, sub)?,
        Some(("categories", sub)) => categories(store, sub)?,
        Some(("trends", sub)) => print_trends(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn print_totals(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let view = viewed_month(sub)?;
    let t = totals(store, view);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &t)? {
        let rows = vec![vec![
            view.label(),
            format!("{:.2}", t.income),
            format!("{:.2}", t.expenses),
            format!("{:.2}", t.income - t.expenses),
            format!("{:.2}", t.paid),
        ]];
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expenses", "Net", "Paid"], rows)
        );
    }
    Ok(())
}

fn payments(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let view = viewed_month(sub)?;
    let s = payment_summary(store, view);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        let rows = vec![vec![
            view.label(),
            format!("{:.2}", s.total),
            format!("{:.2}", s.paid),
            format!("{:.2}", s.remaining),
            format!("{:.1}%", s.progress_percent),
        ]];
        println!(
            "{}",
            pretty_table(&["Month", "Bills", "Paid", "Remaining", "Progress"], rows)
        );
    }
    Ok(())
}

fn summary(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let view = viewed_month(sub)?;
    let s = monthly_summary(store, view);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        let rows = vec![vec![
            view.label(),
            format!("{:.2}", s.income),
            format!("{:.2}", s.paid_income),
            format!("{:.2}", s.expenses),
            format!("{:.2}", s.balance),
        ]];
        println!(
            "{}",
            pretty_table(
                &["Month", "Income", "Received", "Expenses", "Balance"],
                rows
            )
        );
    }
    Ok(())
}

fn categories(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let view = viewed_month(sub)?;
    let data = category_breakdown(store, view);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|c| vec![c.category.clone(), format!("{:.2}", c.amount)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}

fn print_trends(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let view = viewed_month(sub)?;
    let months = usize::from(*sub.get_one::<u16>("months").unwrap_or(&6));
    let data = trends(store, view, months);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|p| {
                vec![
                    p.month.label(),
                    format!("{:.2}", p.income),
                    format!("{:.2}", p.expenses),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Income", "Expenses"], rows));
    }
    Ok(())
}
