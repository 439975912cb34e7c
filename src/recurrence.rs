// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Creating, editing and deleting transactions, including whole recurring series.
//!
//! Recurring submissions expand into one occurrence per due date up to the end
//! of the viewed year, each bucketed under the month it falls due. Occurrences
//! of a series share `original_transaction_id`, which is how edits and deletes
//! reach "this and every later occurrence".

use chrono::NaiveDate;

use crate::models::{
    Kind, MonthKey, NewTransaction, Origin, Status, Transaction, TxnId, TxnType,
};
use crate::schedule::{Occurrences, year_end};
use crate::store::{Buckets, Store, insert_unique};
use crate::utils::parse_amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    SingleOccurrence,
    AllFutureOccurrences,
}

/// Decisions the caller makes while a delete or edit is in progress.
pub trait Prompt {
    /// Gate for deletions.
    fn confirm(&mut self, txn: &Transaction) -> bool;
    /// Only asked for occurrences of a recurring series.
    fn scope(&mut self, txn: &Transaction) -> Scope;
}

impl Prompt for Scope {
    fn confirm(&mut self, _txn: &Transaction) -> bool {
        true
    }

    fn scope(&mut self, _txn: &Transaction) -> Scope {
        *self
    }
}

/// Fixed answers, for callers that decide up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub confirm: bool,
    pub scope: Scope,
}

impl Prompt for Preset {
    fn confirm(&mut self, _txn: &Transaction) -> bool {
        self.confirm
    }

    fn scope(&mut self, _txn: &Transaction) -> Scope {
        self.scope
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Number of stored transactions touched.
    Applied(usize),
    Cancelled,
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Added {
    /// Id of the stored transaction, or the series id for recurring submissions.
    pub seed: TxnId,
    pub occurrences: usize,
}

/// Fields a user can change on an existing transaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    pub description: Option<String>,
    /// Raw input; anything unparsable becomes zero.
    pub amount: Option<String>,
    /// Ignored for income.
    pub category: Option<String>,
    /// Only ever applied to the addressed transaction.
    pub due_date: Option<NaiveDate>,
}

impl Patch {
    fn apply(&self, txn: &mut Transaction) {
        if let Some(description) = &self.description {
            txn.description = description.clone();
        }
        if let Some(amount) = &self.amount {
            txn.amount = parse_amount(amount);
        }
        if let (Some(new_category), Kind::Expense { category }) = (&self.category, &mut txn.kind) {
            *category = new_category.clone();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Location {
    Ledger,
    Bucket(MonthKey),
}

/// Ledger first, then the bucket for `at`.
fn locate(store: &Store, at: MonthKey, id: TxnId) -> Option<(Location, Transaction)> {
    if let Some(t) = store.find_in_ledger(id) {
        return Some((Location::Ledger, t.clone()));
    }
    store
        .find_in_bucket(at, id)
        .map(|t| (Location::Bucket(at), t.clone()))
}

/// Stores a submission. Recurring ones expand through December of `view.year`.
///
/// One-time income goes to the ledger; one-time expenses go to the bucket of
/// their due date. Everything starts unpaid.
pub fn add_transaction(store: &mut Store, view: MonthKey, new: NewTransaction) -> Added {
    let seed = TxnId(store.next_id(new.created));

    if !new.frequency.is_recurring() {
        let txn = Transaction {
            id: seed,
            kind: new.kind,
            description: new.description,
            amount: new.amount,
            due_date: new.due_date,
            frequency: new.frequency,
            status: Status::Unpaid,
            origin: Origin::Seed,
            date: new.created,
        };
        match txn.txn_type() {
            TxnType::Income => store.add_to_ledger(txn),
            TxnType::Expense => {
                store.add_to_bucket(txn.due_in(), txn);
            }
        }
        return Added {
            seed,
            occurrences: 0,
        };
    }

    let end = year_end(view.year);
    let items: Vec<(MonthKey, Transaction)> = Occurrences::new(new.due_date, new.frequency, end)
        .map(|due| {
            let txn = Transaction {
                id: TxnId(store.next_id(new.created)),
                kind: new.kind.clone(),
                description: new.description.clone(),
                amount: new.amount,
                due_date: due,
                frequency: new.frequency,
                status: Status::Unpaid,
                origin: Origin::Occurrence {
                    original_transaction_id: seed,
                },
                date: new.created,
            };
            (MonthKey::of(due), txn)
        })
        .collect();

    let occurrences = store.extend_buckets(items);
    tracing::debug!(
        "expanded {} series {seed} into {occurrences} occurrences through {end}",
        new.frequency
    );
    Added { seed, occurrences }
}

/// Deletes `id`, looked up in the ledger and then in the bucket for `from`.
///
/// For an occurrence, `Scope::AllFutureOccurrences` removes every occurrence of
/// the series in buckets from `from` onwards; earlier months keep theirs.
pub fn delete_transaction(
    store: &mut Store,
    from: MonthKey,
    id: TxnId,
    prompt: &mut impl Prompt,
) -> Change {
    let Some((location, txn)) = locate(store, from, id) else {
        return Change::NotFound;
    };
    if !prompt.confirm(&txn) {
        return Change::Cancelled;
    }

    match (location, txn.series()) {
        (Location::Ledger, _) => {
            store.remove_from_ledger(id);
            Change::Applied(1)
        }
        (Location::Bucket(key), Some(series)) => match prompt.scope(&txn) {
            Scope::SingleOccurrence => {
                store.remove_from_bucket(key, id);
                Change::Applied(1)
            }
            Scope::AllFutureOccurrences => {
                let removed = store.update_buckets(|buckets| truncate_series(buckets, series, from));
                tracing::debug!("removed {removed} occurrences of {series} from {from} on");
                Change::Applied(removed)
            }
        },
        (Location::Bucket(key), None) => {
            store.remove_from_bucket(key, id);
            Change::Applied(1)
        }
    }
}

fn truncate_series(buckets: &mut Buckets, series: TxnId, from: MonthKey) -> usize {
    let mut removed = 0;
    for txns in buckets.range_mut(from..).map(|(_, v)| v) {
        let before = txns.len();
        txns.retain(|t| t.series() != Some(series));
        removed += before - txns.len();
    }
    removed
}

/// Applies `patch` to `id`, using the same lookup as [`delete_transaction`].
///
/// For an occurrence, `Scope::AllFutureOccurrences` applies the patch to every
/// occurrence of the series in buckets from `at` onwards. A new due date moves
/// only the addressed transaction, into the bucket of its new month.
pub fn edit_transaction(
    store: &mut Store,
    at: MonthKey,
    id: TxnId,
    patch: &Patch,
    prompt: &mut impl Prompt,
) -> Change {
    let Some((location, txn)) = locate(store, at, id) else {
        return Change::NotFound;
    };

    match location {
        Location::Ledger => store.update_ledger(|ledger| {
            match ledger.iter_mut().find(|t| t.id == id) {
                Some(t) => {
                    patch.apply(t);
                    if let Some(due) = patch.due_date {
                        t.due_date = due;
                    }
                    Change::Applied(1)
                }
                None => Change::NotFound,
            }
        }),
        Location::Bucket(key) => {
            let scope = match txn.series() {
                Some(_) => prompt.scope(&txn),
                None => Scope::SingleOccurrence,
            };
            store.update_buckets(|buckets| {
                let edited = match (scope, txn.series()) {
                    (Scope::AllFutureOccurrences, Some(series)) => {
                        let mut n = 0;
                        for txns in buckets.range_mut(at..).map(|(_, v)| v) {
                            for t in txns.iter_mut().filter(|t| t.series() == Some(series)) {
                                patch.apply(t);
                                n += 1;
                            }
                        }
                        n
                    }
                    _ => match find_mut(buckets, key, id) {
                        Some(t) => {
                            patch.apply(t);
                            1
                        }
                        None => 0,
                    },
                };
                if let Some(due) = patch.due_date {
                    reschedule(buckets, key, id, due);
                }
                Change::Applied(edited)
            })
        }
    }
}

fn find_mut(buckets: &mut Buckets, key: MonthKey, id: TxnId) -> Option<&mut Transaction> {
    buckets.get_mut(&key)?.iter_mut().find(|t| t.id == id)
}

fn reschedule(buckets: &mut Buckets, key: MonthKey, id: TxnId, due: NaiveDate) {
    let target = MonthKey::of(due);
    if target == key {
        if let Some(t) = find_mut(buckets, key, id) {
            t.due_date = due;
        }
        return;
    }
    let Some(txns) = buckets.get_mut(&key) else {
        return;
    };
    let Some(pos) = txns.iter().position(|t| t.id == id) else {
        return;
    };
    let mut moved = txns.remove(pos);
    moved.due_date = due;
    insert_unique(buckets, target, moved);
}

/// Flips paid, clearing skipped. Looks in the bucket for `at`, then the ledger.
pub fn toggle_paid(store: &mut Store, at: MonthKey, id: TxnId) -> Change {
    toggle(store, at, id, |s| match s {
        Status::Paid => Status::Unpaid,
        _ => Status::Paid,
    })
}

/// Flips skipped, clearing paid.
pub fn toggle_skipped(store: &mut Store, at: MonthKey, id: TxnId) -> Change {
    toggle(store, at, id, |s| match s {
        Status::Skipped => Status::Unpaid,
        _ => Status::Skipped,
    })
}

fn toggle(store: &mut Store, at: MonthKey, id: TxnId, flip: impl Fn(Status) -> Status) -> Change {
    if store.find_in_bucket(at, id).is_some() {
        store.update_buckets(|buckets| {
            if let Some(t) = find_mut(buckets, at, id) {
                t.status = flip(t.status);
            }
        });
        return Change::Applied(1);
    }
    if store.find_in_ledger(id).is_some() {
        store.update_ledger(|ledger| {
            if let Some(t) = ledger.iter_mut().find(|t| t.id == id) {
                t.status = flip(t.status);
            }
        });
        return Change::Applied(1);
    }
    Change::NotFound
}
