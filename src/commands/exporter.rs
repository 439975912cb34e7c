// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde_json::json;

use super::viewed_month;
use crate::query::month_transactions;
use crate::store::Store;

pub fn handle(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let view = viewed_month(sub)?;
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut txns = month_transactions(store, view);
    txns.sort_by(|a, b| a.due_date.cmp(&b.due_date).then(a.id.cmp(&b.id)));

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "due",
                "type",
                "description",
                "category",
                "amount",
                "frequency",
                "status",
            ])?;
            for t in &txns {
                wtr.write_record([
                    t.id.to_string(),
                    t.due_date.to_string(),
                    t.txn_type().to_string(),
                    t.description.clone(),
                    t.kind.category().unwrap_or_default().to_string(),
                    format!("{:.2}", t.amount),
                    t.frequency.to_string(),
                    t.status.as_str().to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let doc = json!({
                "month": view,
                "transactions": txns,
            });
            std::fs::write(out, serde_json::to_string_pretty(&doc)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported {} transactions for {} to {}", txns.len(), view.label(), out);
    Ok(())
}
