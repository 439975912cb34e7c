// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Occurrence dates for recurring transactions.

use chrono::{Days, Months, NaiveDate};

use crate::models::Frequency;

/// Iterator over the due dates of a series, from `start` through `end` inclusive.
///
/// Monthly steps keep the day of month when the target month has it and clamp
/// to the month's last day otherwise. The clamped day then carries forward:
/// Jan 31 is followed by Feb 29 (2024), Mar 29, Apr 29 and so on.
#[derive(Debug, Clone)]
pub struct Occurrences {
    next: Option<NaiveDate>,
    end: NaiveDate,
    frequency: Frequency,
}

impl Occurrences {
    pub fn new(start: NaiveDate, frequency: Frequency, end: NaiveDate) -> Self {
        Self {
            next: Some(start),
            end,
            frequency,
        }
    }
}

impl Iterator for Occurrences {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next.filter(|d| *d <= self.end)?;
        self.next = step(current, self.frequency);
        Some(current)
    }
}

fn step(date: NaiveDate, frequency: Frequency) -> Option<NaiveDate> {
    match frequency {
        Frequency::Weekly => date.checked_add_days(Days::new(7)),
        Frequency::BiWeekly => date.checked_add_days(Days::new(14)),
        // chrono clamps to the last day of the target month
        Frequency::Monthly => date.checked_add_months(Months::new(1)),
        Frequency::OneTime => None,
    }
}

pub fn generate_occurrences(start: NaiveDate, frequency: Frequency, end: NaiveDate) -> Vec<NaiveDate> {
    Occurrences::new(start, frequency, end).collect()
}

/// December 31 of `year`, the bound recurring series are expanded to.
pub fn year_end(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(NaiveDate::MAX)
}
