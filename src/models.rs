// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// Predefined expense categories; any other text is accepted as a custom one.
pub const CATEGORIES: [&str; 3] = ["Bills", "Savings", "Personal"];

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxnId(pub i64);

impl fmt::Display for TxnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub i64);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Income or expense. Only expenses carry a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Kind {
    Income,
    Expense { category: String },
}

impl Kind {
    pub fn txn_type(&self) -> TxnType {
        match self {
            Kind::Income => TxnType::Income,
            Kind::Expense { .. } => TxnType::Expense,
        }
    }

    pub fn category(&self) -> Option<&str> {
        match self {
            Kind::Income => None,
            Kind::Expense { category } => Some(category),
        }
    }
}

/// The bare discriminant of [`Kind`], used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnType {
    Income,
    Expense,
}

impl TxnType {
    pub fn as_str(self) -> &'static str {
        match self {
            TxnType::Income => "income",
            TxnType::Expense => "expense",
        }
    }
}

impl fmt::Display for TxnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxnType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TxnType::Income),
            "expense" => Ok(TxnType::Expense),
            _ => Err(Error::InvalidKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Frequency {
    #[default]
    OneTime,
    Weekly,
    BiWeekly,
    Monthly,
}

impl Frequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::OneTime => "One-time",
            Frequency::Weekly => "Weekly",
            Frequency::BiWeekly => "Bi-Weekly",
            Frequency::Monthly => "Monthly",
        }
    }

    pub fn is_recurring(self) -> bool {
        self != Frequency::OneTime
    }
}

// Unrecognized frequencies are never expanded, so they read as one-time.
impl From<&str> for Frequency {
    fn from(s: &str) -> Self {
        let norm: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match norm.as_str() {
            "weekly" => Frequency::Weekly,
            "biweekly" => Frequency::BiWeekly,
            "monthly" => Frequency::Monthly,
            _ => Frequency::OneTime,
        }
    }
}

impl From<String> for Frequency {
    fn from(s: String) -> Self {
        Frequency::from(s.as_str())
    }
}

impl From<Frequency> for &'static str {
    fn from(f: Frequency) -> Self {
        f.as_str()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paid and skipped are mutually exclusive, so they share one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Unpaid,
    Paid,
    Skipped,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Unpaid => "unpaid",
            Status::Paid => "paid",
            Status::Skipped => "skipped",
        }
    }
}

/// Where a stored transaction came from.
///
/// `Seed` is a transaction stored exactly as the user submitted it. Recurring
/// submissions are never stored themselves; their expansion produces one
/// `Occurrence` per date, all pointing back at the submission's id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "lowercase")]
pub enum Origin {
    Seed,
    #[serde(rename_all = "camelCase")]
    Occurrence { original_transaction_id: TxnId },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TxnId,
    #[serde(flatten)]
    pub kind: Kind,
    pub description: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub frequency: Frequency,
    #[serde(default)]
    pub status: Status,
    #[serde(flatten)]
    pub origin: Origin,
    /// When the transaction was entered, not when it is due.
    pub date: NaiveDateTime,
}

impl Transaction {
    pub fn txn_type(&self) -> TxnType {
        self.kind.txn_type()
    }

    pub fn series(&self) -> Option<TxnId> {
        match self.origin {
            Origin::Seed => None,
            Origin::Occurrence {
                original_transaction_id,
            } => Some(original_transaction_id),
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status == Status::Paid
    }

    pub fn is_skipped(&self) -> bool {
        self.status == Status::Skipped
    }

    /// Month the transaction was entered in.
    pub fn entered_in(&self) -> MonthKey {
        MonthKey::of(self.date.date())
    }

    /// Month of the due date.
    pub fn due_in(&self) -> MonthKey {
        MonthKey::of(self.due_date)
    }
}

/// A user submission, before ids and expansion are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: Kind,
    pub description: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub frequency: Frequency,
    pub created: NaiveDateTime,
}

impl NewTransaction {
    pub fn income(
        description: impl Into<String>,
        amount: Decimal,
        due_date: NaiveDate,
        frequency: Frequency,
    ) -> Self {
        Self {
            kind: Kind::Income,
            description: description.into(),
            amount,
            due_date,
            frequency,
            created: Local::now().naive_local(),
        }
    }

    pub fn expense(
        description: impl Into<String>,
        amount: Decimal,
        category: impl Into<String>,
        due_date: NaiveDate,
        frequency: Frequency,
    ) -> Self {
        Self {
            kind: Kind::Expense {
                category: category.into(),
            },
            description: description.into(),
            amount,
            due_date,
            frequency,
            created: Local::now().naive_local(),
        }
    }

    pub fn created_at(mut self, at: NaiveDateTime) -> Self {
        self.created = at;
        self
    }
}

/// Calendar month with a 0-based month index, keyed as `"{year}-{month}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (month < 12).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
        }
    }

    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    pub fn prev(self) -> Self {
        if self.month == 0 {
            Self {
                year: self.year - 1,
                month: 11,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(self) -> Self {
        if self.month == 11 {
            Self {
                year: self.year + 1,
                month: 0,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// "Mar 2024"
    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.month as usize], self.year)
    }

    /// Parses human `YYYY-MM` input, where the month is 1-based.
    pub fn parse_human(s: &str) -> Result<Self, Error> {
        let date = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .map_err(|_| Error::InvalidMonth(s.to_string()))?;
        Ok(Self::of(date))
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidMonth(s.to_string());
        let (y, m) = s.rsplit_once('-').ok_or_else(invalid)?;
        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;
        MonthKey::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A debt record. Payoff planning over these lives outside this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub id: CardId,
    pub name: String,
    pub balance: Decimal,
    pub interest_rate: Decimal,
    pub min_payment: Decimal,
}
