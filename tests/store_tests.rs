// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use duebook::cards::{CardInput, add_card, set_card_budget};
use duebook::db::{KvStore, MemoryKv, SqliteKv};
use duebook::models::{Frequency, Kind, MonthKey, NewTransaction, Origin, Status, Transaction, TxnId};
use duebook::recurrence::add_transaction;
use duebook::store::{
    BUCKETS_KEY, CARD_BUDGET_KEY, CARDS_KEY, LEDGER_KEY, Store, merge_filter_unique,
};
use rust_decimal::Decimal;
use serde_json::Value;
use tempfile::tempdir;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn key(year: i32, month: u32) -> MonthKey {
    MonthKey::new(year, month).unwrap()
}

fn txn(id: i64, description: &str) -> Transaction {
    let due = d(2024, 4, 10);
    Transaction {
        id: TxnId(id),
        kind: Kind::Expense {
            category: "Bills".into(),
        },
        description: description.into(),
        amount: Decimal::from(10),
        due_date: due,
        frequency: Frequency::OneTime,
        status: Status::Unpaid,
        origin: Origin::Seed,
        date: due.and_hms_opt(8, 0, 0).unwrap(),
    }
}

fn populate(store: &mut Store) {
    let created = d(2024, 3, 1).and_hms_opt(10, 0, 0).unwrap();
    let rent = NewTransaction::expense("Rent", Decimal::from(1000), "Bills", d(2024, 3, 15), Frequency::Monthly)
        .created_at(created);
    add_transaction(store, key(2024, 2), rent);
    let bonus = NewTransaction::income("Bonus", Decimal::from(250), d(2024, 3, 20), Frequency::OneTime)
        .created_at(created);
    add_transaction(store, key(2024, 2), bonus);
    add_card(
        store,
        CardInput {
            name: "Visa".into(),
            balance: "1,200.50".into(),
            interest_rate: "19.99".into(),
            min_payment: "35".into(),
        },
        created,
    );
    set_card_budget(store, "300");
}

#[test]
fn sqlite_store_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("duebook.sqlite");

    let (ledger, buckets, cards) = {
        let mut store = Store::load(SqliteKv::open(&path).unwrap());
        populate(&mut store);
        store.save().unwrap();
        (
            store.ledger().to_vec(),
            store.buckets().clone(),
            store.cards().to_vec(),
        )
    };

    let reopened = Store::load(SqliteKv::open(&path).unwrap());
    assert_eq!(reopened.ledger(), ledger.as_slice());
    assert_eq!(reopened.buckets(), &buckets);
    assert_eq!(reopened.cards(), cards.as_slice());
    assert_eq!(reopened.card_budget(), "300");
}

#[test]
fn writes_go_through_without_an_explicit_save() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("duebook.sqlite");
    {
        let mut store = Store::load(SqliteKv::open(&path).unwrap());
        populate(&mut store);
    }
    let reopened = Store::load(SqliteKv::open(&path).unwrap());
    assert_eq!(reopened.buckets().len(), 10);
    assert_eq!(reopened.ledger().len(), 1);
    assert_eq!(reopened.cards().len(), 1);
}

#[test]
fn stored_layout_uses_month_keys_and_camel_case_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("duebook.sqlite");
    {
        let mut store = Store::load(SqliteKv::open(&path).unwrap());
        populate(&mut store);
    }

    let kv = SqliteKv::open(&path).unwrap();
    let buckets: Value = serde_json::from_str(&kv.get(BUCKETS_KEY).unwrap().unwrap()).unwrap();
    let march = &buckets["2024-2"][0];
    assert_eq!(march["type"], "expense");
    assert_eq!(march["category"], "Bills");
    assert_eq!(march["dueDate"], "2024-03-15");
    assert_eq!(march["frequency"], "Monthly");
    assert_eq!(march["origin"], "occurrence");
    assert!(march["originalTransactionId"].is_i64());
    assert!(buckets.get("2024-12").is_none());

    let ledger: Value = serde_json::from_str(&kv.get(LEDGER_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(ledger[0]["type"], "income");
    assert_eq!(ledger[0]["frequency"], "One-time");
    assert!(ledger[0].get("category").is_none());

    let cards: Value = serde_json::from_str(&kv.get(CARDS_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(cards[0]["name"], "Visa");
    assert!(cards[0].get("interestRate").is_some());
    assert!(cards[0].get("minPayment").is_some());

    assert_eq!(kv.get(CARD_BUDGET_KEY).unwrap().as_deref(), Some("300"));
}

#[test]
fn corrupt_entries_load_as_empty() {
    let kv = MemoryKv::new()
        .with_entry(LEDGER_KEY, "{not json")
        .with_entry(BUCKETS_KEY, "[]")
        .with_entry(CARDS_KEY, "null");
    let store = Store::load(kv);
    assert!(store.ledger().is_empty());
    assert!(store.buckets().is_empty());
    assert!(store.cards().is_empty());
    assert_eq!(store.card_budget(), "");
}

#[test]
fn missing_status_reads_as_unpaid() {
    let raw = r#"[{"id":5,"type":"income","description":"Pay","amount":"100",
        "dueDate":"2024-01-05","frequency":"Quarterly","origin":"seed",
        "date":"2024-01-01T09:00:00"}]"#;
    let store = Store::load(MemoryKv::new().with_entry(LEDGER_KEY, raw));
    let t = &store.ledger()[0];
    assert_eq!(t.status, Status::Unpaid);
    assert_eq!(t.frequency, Frequency::OneTime);
    assert_eq!(t.kind, Kind::Income);
}

#[test]
fn empty_buckets_are_dropped_on_load() {
    let raw = r#"{"2024-0":[],"2024-1":[]}"#;
    let store = Store::load(MemoryKv::new().with_entry(BUCKETS_KEY, raw));
    assert!(store.buckets().is_empty());
}

#[test]
fn loaded_ids_are_never_handed_out_again() {
    let raw = r#"[{"id":99999999999999,"type":"income","description":"Pay","amount":"1",
        "dueDate":"2024-01-05","frequency":"One-time","origin":"seed",
        "date":"2024-01-01T09:00:00"}]"#;
    let mut store = Store::load(MemoryKv::new().with_entry(LEDGER_KEY, raw));
    let now = d(2024, 1, 1).and_hms_opt(0, 0, 0).unwrap();
    assert_eq!(store.next_id(now), 100000000000000);
}

#[test]
fn next_id_is_monotonic_for_the_same_instant() {
    let mut store = Store::in_memory();
    let now = d(2024, 6, 1).and_hms_opt(12, 0, 0).unwrap();
    let a = store.next_id(now);
    let b = store.next_id(now);
    let c = store.next_id(now);
    assert_eq!(a, now.and_utc().timestamp_millis());
    assert_eq!(b, a + 1);
    assert_eq!(c, a + 2);
}

#[test]
fn merge_filter_unique_keeps_first_and_drops_repeats() {
    let a = vec![txn(1, "a1"), txn(2, "a2")];
    let b = vec![txn(2, "b2"), txn(3, "b3")];

    let merged = merge_filter_unique(&a, &b);
    let names: Vec<&str> = merged.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(names, vec!["a1", "a2", "b3"]);

    assert_eq!(merge_filter_unique(&a, &a), a);
    assert!(merge_filter_unique(&[], &[]).is_empty());
}

#[test]
fn a_bucket_never_holds_the_same_id_twice() {
    let mut store = Store::in_memory();
    assert!(store.add_to_bucket(key(2024, 3), txn(1, "first")));
    assert!(!store.add_to_bucket(key(2024, 3), txn(1, "again")));
    assert!(store.add_to_bucket(key(2024, 4), txn(1, "other month")));
    assert_eq!(store.bucket(key(2024, 3)).len(), 1);
    assert_eq!(store.bucket(key(2024, 3))[0].description, "first");
}

#[test]
fn every_mutation_bumps_the_generation() {
    let mut store = Store::in_memory();
    let g0 = store.generation();
    store.add_to_ledger(txn(1, "x"));
    let g1 = store.generation();
    assert!(g1 > g0);
    store.add_to_bucket(key(2024, 3), txn(2, "y"));
    let g2 = store.generation();
    assert!(g2 > g1);
    assert!(store.remove_from_bucket(key(2024, 3), TxnId(2)));
    assert!(store.generation() > g2);

    let before = store.generation();
    assert!(!store.remove_from_ledger(TxnId(42)));
    assert_eq!(store.generation(), before);
}

#[test]
fn removing_the_last_entry_drops_the_bucket() {
    let mut store = Store::in_memory();
    store.add_to_bucket(key(2024, 3), txn(1, "only"));
    store.remove_from_bucket(key(2024, 3), TxnId(1));
    assert!(store.buckets().is_empty());
}

#[test]
fn repeated_ids_in_a_loaded_bucket_keep_the_first() {
    let mut first = txn(3, "first");
    first.status = Status::Paid;
    let buckets = serde_json::json!({
        "2024-3": [first, txn(3, "second"), txn(4, "other")],
    });
    let store = Store::load(MemoryKv::new().with_entry(BUCKETS_KEY, &buckets.to_string()));
    let april = store.bucket(key(2024, 3));
    let names: Vec<&str> = april.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(names, vec!["first", "other"]);
    assert_eq!(april[0].status, Status::Paid);
}
