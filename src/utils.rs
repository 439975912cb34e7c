// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::MonthKey;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<MonthKey> {
    MonthKey::parse_human(s).with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))
}

/// Lenient amount parsing for form input: anything unparsable or negative is zero.
pub fn parse_amount(s: &str) -> Decimal {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',' && *c != '$').collect();
    match cleaned.parse::<Decimal>() {
        Ok(d) if d.is_sign_negative() => Decimal::ZERO,
        Ok(d) => d,
        Err(_) => {
            tracing::debug!("amount '{s}' is not a number, using 0");
            Decimal::ZERO
        }
    }
}

pub fn round_money(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("${:.2}", d)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
