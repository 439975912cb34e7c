// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod transactions;
pub mod reports;
pub mod cards;
pub mod exporter;

use anyhow::Result;

use crate::models::MonthKey;
use crate::utils::parse_month;

/// `--month` if given, else the current month.
pub fn viewed_month(m: &clap::ArgMatches) -> Result<MonthKey> {
    match m.get_one::<String>("month") {
        Some(s) => parse_month(s),
        None => Ok(MonthKey::current()),
    }
}
