// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use duebook::cards::{
    CardInput, CardPatch, add_card, card_budget, delete_card, edit_card, set_card_budget,
    total_balance, total_min_payment,
};
use duebook::models::CardId;
use duebook::store::Store;
use rust_decimal::Decimal;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 9, 1)
        .unwrap()
        .and_hms_opt(18, 0, 0)
        .unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn input(name: &str, balance: &str, rate: &str, min: &str) -> CardInput {
    CardInput {
        name: name.into(),
        balance: balance.into(),
        interest_rate: rate.into(),
        min_payment: min.into(),
    }
}

#[test]
fn add_edit_delete_card() {
    let mut store = Store::in_memory();
    let visa = add_card(&mut store, input("Visa", "$2,500.00", "21.5", "75"), now());
    let loan = add_card(&mut store, input("Car loan", "9800", "4.9", "310"), now());
    assert_ne!(visa, loan);
    assert_eq!(store.cards().len(), 2);
    assert_eq!(store.cards()[0].balance, dec("2500"));
    assert_eq!(total_balance(&store), dec("12300"));
    assert_eq!(total_min_payment(&store), dec("385"));

    let patch = CardPatch {
        balance: Some("2400".into()),
        ..CardPatch::default()
    };
    assert!(edit_card(&mut store, visa, &patch));
    let card = store.cards().iter().find(|c| c.id == visa).unwrap();
    assert_eq!(card.balance, dec("2400"));
    assert_eq!(card.name, "Visa");
    assert_eq!(card.interest_rate, dec("21.5"));

    assert!(delete_card(&mut store, loan));
    assert_eq!(store.cards().len(), 1);
    assert_eq!(total_min_payment(&store), dec("75"));
}

#[test]
fn unknown_card_ids_change_nothing() {
    let mut store = Store::in_memory();
    add_card(&mut store, input("Visa", "100", "0", "10"), now());
    let before = store.generation();
    assert!(!edit_card(&mut store, CardId(1), &CardPatch::default()));
    assert!(!delete_card(&mut store, CardId(1)));
    assert_eq!(store.generation(), before);
}

#[test]
fn card_amounts_parse_leniently() {
    let mut store = Store::in_memory();
    add_card(&mut store, input("Store card", "lots", "-3", ""), now());
    let card = &store.cards()[0];
    assert_eq!(card.balance, Decimal::ZERO);
    assert_eq!(card.interest_rate, Decimal::ZERO);
    assert_eq!(card.min_payment, Decimal::ZERO);
}

#[test]
fn budget_is_kept_as_entered_and_blank_input_is_ignored() {
    let mut store = Store::in_memory();
    assert_eq!(card_budget(&store), Decimal::ZERO);

    assert!(set_card_budget(&mut store, " 450.75 "));
    assert_eq!(store.card_budget(), "450.75");
    assert_eq!(card_budget(&store), dec("450.75"));

    assert!(!set_card_budget(&mut store, "   "));
    assert_eq!(store.card_budget(), "450.75");
}

#[test]
fn card_ids_do_not_collide_with_transaction_ids() {
    let mut store = Store::in_memory();
    let card = add_card(&mut store, input("Visa", "1", "1", "1"), now());
    let next = store.next_id(now());
    assert!(next > card.0);
}
