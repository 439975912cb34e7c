// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! In-memory ledger and month buckets, written through to a [`KvStore`].
//!
//! Every mutation bumps [`Store::generation`] and rewrites the collection it
//! touched under its storage key. A failed write is logged and leaves the
//! in-memory state as mutated; [`Store::save`] rewrites everything and reports
//! the error for callers that need durability.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDateTime;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::db::{KvStore, MemoryKv};
use crate::error::Result;
use crate::models::{CreditCard, MonthKey, Transaction, TxnId};

pub const LEDGER_KEY: &str = "transactions";
pub const BUCKETS_KEY: &str = "allMonthsTransactions";
pub const CARDS_KEY: &str = "creditCards";
pub const CARD_BUDGET_KEY: &str = "creditCardBudget";

pub type Buckets = BTreeMap<MonthKey, Vec<Transaction>>;

pub struct Store {
    kv: Box<dyn KvStore>,
    ledger: Vec<Transaction>,
    buckets: Buckets,
    cards: Vec<CreditCard>,
    card_budget: String,
    last_id: i64,
    generation: u64,
}

impl Store {
    /// Reads every collection from `kv`. Unreadable or corrupt entries start empty.
    pub fn load(kv: impl KvStore + 'static) -> Self {
        let ledger: Vec<Transaction> = read_json(&kv, LEDGER_KEY);
        let mut buckets: Buckets = read_json(&kv, BUCKETS_KEY);
        for (key, txns) in buckets.iter_mut() {
            let before = txns.len();
            *txns = merge_filter_unique(txns, &[]);
            if txns.len() < before {
                tracing::warn!(
                    "bucket {key} held {} repeated ids, keeping the first of each",
                    before - txns.len()
                );
            }
        }
        buckets.retain(|_, txns| !txns.is_empty());
        let cards: Vec<CreditCard> = read_json(&kv, CARDS_KEY);
        let card_budget = match kv.get(CARD_BUDGET_KEY) {
            Ok(v) => v.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("could not read {CARD_BUDGET_KEY}, starting empty: {e}");
                String::new()
            }
        };

        let last_id = ledger
            .iter()
            .chain(buckets.values().flatten())
            .flat_map(|t| [Some(t.id.0), t.series().map(|s| s.0)])
            .flatten()
            .chain(cards.iter().map(|c| c.id.0))
            .max()
            .unwrap_or(0);

        tracing::debug!(
            "loaded {} ledger rows, {} month buckets, {} cards",
            ledger.len(),
            buckets.len(),
            cards.len()
        );

        Self {
            kv: Box::new(kv),
            ledger,
            buckets,
            cards,
            card_budget,
            last_id,
            generation: 0,
        }
    }

    pub fn in_memory() -> Self {
        Self::load(MemoryKv::new())
    }

    /// Rewrites every collection to the backend.
    pub fn save(&mut self) -> Result<()> {
        write_json(self.kv.as_mut(), LEDGER_KEY, &self.ledger)?;
        write_json(self.kv.as_mut(), BUCKETS_KEY, &self.buckets)?;
        write_json(self.kv.as_mut(), CARDS_KEY, &self.cards)?;
        self.kv.set(CARD_BUDGET_KEY, &self.card_budget)?;
        Ok(())
    }

    /// Millisecond timestamp of `now`, bumped past every id handed out or loaded.
    pub fn next_id(&mut self, now: NaiveDateTime) -> i64 {
        let stamp = now.and_utc().timestamp_millis();
        self.last_id = stamp.max(self.last_id + 1);
        self.last_id
    }

    /// Changes on every mutation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn ledger(&self) -> &[Transaction] {
        &self.ledger
    }

    pub fn buckets(&self) -> &Buckets {
        &self.buckets
    }

    pub fn bucket(&self, key: MonthKey) -> &[Transaction] {
        self.buckets.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn cards(&self) -> &[CreditCard] {
        &self.cards
    }

    pub fn card_budget(&self) -> &str {
        &self.card_budget
    }

    pub fn find_in_ledger(&self, id: TxnId) -> Option<&Transaction> {
        self.ledger.iter().find(|t| t.id == id)
    }

    pub fn find_in_bucket(&self, key: MonthKey, id: TxnId) -> Option<&Transaction> {
        self.bucket(key).iter().find(|t| t.id == id)
    }

    pub fn add_to_ledger(&mut self, txn: Transaction) {
        self.update_ledger(|ledger| ledger.push(txn));
    }

    /// Returns `false` when the bucket already holds a transaction with this id.
    pub fn add_to_bucket(&mut self, key: MonthKey, txn: Transaction) -> bool {
        self.update_buckets(|buckets| insert_unique(buckets, key, txn))
    }

    /// Inserts a batch with a single write-through; returns how many were new.
    pub fn extend_buckets(&mut self, items: impl IntoIterator<Item = (MonthKey, Transaction)>) -> usize {
        self.update_buckets(|buckets| {
            items
                .into_iter()
                .filter(|(key, txn)| insert_unique(buckets, *key, txn.clone()))
                .count()
        })
    }

    pub fn remove_from_ledger(&mut self, id: TxnId) -> bool {
        if self.find_in_ledger(id).is_none() {
            return false;
        }
        self.update_ledger(|ledger| ledger.retain(|t| t.id != id));
        true
    }

    pub fn remove_from_bucket(&mut self, key: MonthKey, id: TxnId) -> bool {
        if self.find_in_bucket(key, id).is_none() {
            return false;
        }
        self.update_buckets(|buckets| {
            if let Some(txns) = buckets.get_mut(&key) {
                txns.retain(|t| t.id != id);
            }
        });
        true
    }

    pub(crate) fn update_ledger<R>(&mut self, f: impl FnOnce(&mut Vec<Transaction>) -> R) -> R {
        let out = f(&mut self.ledger);
        self.generation += 1;
        if let Err(e) = write_json(self.kv.as_mut(), LEDGER_KEY, &self.ledger) {
            tracing::error!("failed to persist {LEDGER_KEY}: {e}");
        }
        out
    }

    pub(crate) fn update_buckets<R>(&mut self, f: impl FnOnce(&mut Buckets) -> R) -> R {
        let out = f(&mut self.buckets);
        self.buckets.retain(|_, txns| !txns.is_empty());
        self.generation += 1;
        if let Err(e) = write_json(self.kv.as_mut(), BUCKETS_KEY, &self.buckets) {
            tracing::error!("failed to persist {BUCKETS_KEY}: {e}");
        }
        out
    }

    pub(crate) fn update_cards<R>(&mut self, f: impl FnOnce(&mut Vec<CreditCard>) -> R) -> R {
        let out = f(&mut self.cards);
        self.generation += 1;
        if let Err(e) = write_json(self.kv.as_mut(), CARDS_KEY, &self.cards) {
            tracing::error!("failed to persist {CARDS_KEY}: {e}");
        }
        out
    }

    pub(crate) fn replace_card_budget(&mut self, budget: String) {
        self.card_budget = budget;
        self.generation += 1;
        if let Err(e) = self.kv.set(CARD_BUDGET_KEY, &self.card_budget) {
            tracing::error!("failed to persist {CARD_BUDGET_KEY}: {e}");
        }
    }
}

pub(crate) fn insert_unique(buckets: &mut Buckets, key: MonthKey, txn: Transaction) -> bool {
    let txns = buckets.entry(key).or_default();
    if txns.iter().any(|t| t.id == txn.id) {
        tracing::warn!("bucket {key} already holds transaction {}", txn.id);
        return false;
    }
    txns.push(txn);
    true
}

/// Concatenates `a` and `b`, keeping the first transaction seen for each id.
pub fn merge_filter_unique(a: &[Transaction], b: &[Transaction]) -> Vec<Transaction> {
    let mut seen = HashSet::new();
    a.iter()
        .chain(b)
        .filter(|t| seen.insert(t.id))
        .cloned()
        .collect()
}

fn read_json<T: DeserializeOwned + Default>(kv: &dyn KvStore, key: &str) -> T {
    let raw = match kv.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            tracing::warn!("could not read {key}, starting empty: {e}");
            return T::default();
        }
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!("corrupt {key}, starting empty: {e}");
        T::default()
    })
}

fn write_json<T: Serialize + ?Sized>(kv: &mut dyn KvStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    kv.set(key, &raw)
}
