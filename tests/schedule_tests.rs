// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Months, NaiveDate};
use duebook::models::Frequency;
use duebook::schedule::{Occurrences, generate_occurrences, year_end};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn days_in_month(date: NaiveDate) -> u32 {
    let first = d(date.year(), date.month(), 1);
    let next = first.checked_add_months(Months::new(1)).unwrap();
    next.pred_opt().unwrap().day()
}

#[test]
fn monthly_clamps_and_keeps_clamped_day() {
    let dates = generate_occurrences(d(2024, 1, 31), Frequency::Monthly, d(2024, 6, 30));
    let days: Vec<u32> = dates.iter().map(|x| x.day()).collect();
    let months: Vec<u32> = dates.iter().map(|x| x.month()).collect();
    assert_eq!(days, vec![31, 29, 29, 29, 29, 29]);
    assert_eq!(months, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn monthly_clamps_to_28_outside_leap_years() {
    let dates = generate_occurrences(d(2023, 1, 30), Frequency::Monthly, d(2023, 4, 30));
    assert_eq!(
        dates,
        vec![d(2023, 1, 30), d(2023, 2, 28), d(2023, 3, 28), d(2023, 4, 28)]
    );
}

#[test]
fn monthly_day_rule_holds_for_many_starts() {
    for year in [2023, 2024] {
        for month in 1..=12 {
            for day in [1, 15, 28, 29, 30, 31] {
                let Some(start) = NaiveDate::from_ymd_opt(year, month, day) else {
                    continue;
                };
                for n in 1..=24usize {
                    let dates: Vec<NaiveDate> =
                        Occurrences::new(start, Frequency::Monthly, year_end(year + 3))
                            .take(n)
                            .collect();
                    assert_eq!(dates.len(), n);
                    for pair in dates.windows(2) {
                        let (prev, next) = (pair[0], pair[1]);
                        let expected_month = prev.checked_add_months(Months::new(1)).unwrap();
                        assert_eq!(next.month(), expected_month.month());
                        assert_eq!(next.day(), prev.day().min(days_in_month(next)));
                    }
                }
            }
        }
    }
}

#[test]
fn weekly_and_biweekly_step_and_count() {
    let cases = [
        (d(2024, 1, 1), d(2024, 1, 1)),
        (d(2024, 1, 1), d(2024, 1, 7)),
        (d(2024, 1, 1), d(2024, 1, 8)),
        (d(2024, 2, 20), d(2024, 12, 31)),
        (d(2023, 12, 25), d(2024, 3, 3)),
    ];
    for (start, end) in cases {
        for (freq, step) in [(Frequency::Weekly, 7), (Frequency::BiWeekly, 14)] {
            let dates = generate_occurrences(start, freq, end);
            let span = (end - start).num_days();
            assert_eq!(dates.len() as i64, span / step + 1, "{start}..{end} {freq}");
            assert_eq!(dates[0], start);
            for pair in dates.windows(2) {
                assert_eq!((pair[1] - pair[0]).num_days(), step);
            }
            assert!(*dates.last().unwrap() <= end);
        }
    }
}

#[test]
fn end_date_is_inclusive() {
    let dates = generate_occurrences(d(2024, 3, 1), Frequency::BiWeekly, d(2024, 3, 29));
    assert_eq!(dates, vec![d(2024, 3, 1), d(2024, 3, 15), d(2024, 3, 29)]);
}

#[test]
fn one_time_yields_only_the_start() {
    let dates = generate_occurrences(d(2024, 5, 10), Frequency::OneTime, d(2024, 12, 31));
    assert_eq!(dates, vec![d(2024, 5, 10)]);
}

#[test]
fn unknown_frequency_reads_as_one_time() {
    assert_eq!(Frequency::from("Quarterly"), Frequency::OneTime);
    assert_eq!(Frequency::from("bi-weekly"), Frequency::BiWeekly);
    assert_eq!(Frequency::from("Bi-Weekly"), Frequency::BiWeekly);
}

#[test]
fn start_after_end_is_empty() {
    assert!(generate_occurrences(d(2025, 1, 5), Frequency::Weekly, d(2024, 12, 31)).is_empty());
}

#[test]
fn sequence_is_restartable() {
    let it = Occurrences::new(d(2024, 1, 31), Frequency::Monthly, d(2024, 12, 31));
    let first: Vec<NaiveDate> = it.clone().collect();
    let second: Vec<NaiveDate> = it.collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 12);
}

#[test]
fn year_end_is_december_31() {
    assert_eq!(year_end(2024), d(2024, 12, 31));
}
