// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Local;

use crate::cards::{
    CardInput, CardPatch, add_card, card_budget, delete_card, edit_card, set_card_budget,
    total_balance, total_min_payment,
};
use crate::models::CardId;
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("delete", sub)) => delete(store, sub)?,
        Some(("budget", sub)) => budget(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let input = CardInput {
        name: sub.get_one::<String>("name").unwrap().trim().to_string(),
        balance: sub.get_one::<String>("balance").unwrap().clone(),
        interest_rate: sub.get_one::<String>("rate").unwrap().clone(),
        min_payment: sub.get_one::<String>("min").unwrap().clone(),
    };
    let name = input.name.clone();
    let id = add_card(store, input, Local::now().naive_local());
    println!("Added '{}' (id {})", name, id);
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &store.cards())? {
        let rows = store
            .cards()
            .iter()
            .map(|c| {
                vec![
                    c.id.to_string(),
                    c.name.clone(),
                    format!("{:.2}", c.balance),
                    format!("{}%", c.interest_rate),
                    format!("{:.2}", c.min_payment),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Name", "Balance", "APR", "Min payment"], rows)
        );
        println!(
            "Total {} / minimums {} / budget {}",
            fmt_money(&total_balance(store)),
            fmt_money(&total_min_payment(store)),
            fmt_money(&card_budget(store))
        );
    }
    Ok(())
}

fn edit(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = CardId(*sub.get_one::<i64>("id").unwrap());
    let patch = CardPatch {
        name: sub.get_one::<String>("name").map(|s| s.trim().to_string()),
        balance: sub.get_one::<String>("balance").cloned(),
        interest_rate: sub.get_one::<String>("rate").cloned(),
        min_payment: sub.get_one::<String>("min").cloned(),
    };
    if edit_card(store, id, &patch) {
        println!("Updated card {}", id);
    } else {
        println!("No card {}", id);
    }
    Ok(())
}

fn delete(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = CardId(*sub.get_one::<i64>("id").unwrap());
    if delete_card(store, id) {
        println!("Deleted card {}", id);
    } else {
        println!("No card {}", id);
    }
    Ok(())
}

fn budget(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    if let Some(amount) = sub.get_one::<String>("amount") {
        if set_card_budget(store, amount) {
            println!("Debt budget set to {}", fmt_money(&card_budget(store)));
            return Ok(());
        }
    }
    println!("Debt budget: {}", fmt_money(&card_budget(store)));
    Ok(())
}
