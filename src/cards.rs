// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Credit-card and loan records plus the monthly debt-payment budget.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::models::{CardId, CreditCard};
use crate::store::Store;
use crate::utils::parse_amount;

/// Raw form input for a card; amounts are parsed leniently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardInput {
    pub name: String,
    pub balance: String,
    pub interest_rate: String,
    pub min_payment: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardPatch {
    pub name: Option<String>,
    pub balance: Option<String>,
    pub interest_rate: Option<String>,
    pub min_payment: Option<String>,
}

pub fn add_card(store: &mut Store, input: CardInput, now: NaiveDateTime) -> CardId {
    let id = CardId(store.next_id(now));
    let card = CreditCard {
        id,
        name: input.name,
        balance: parse_amount(&input.balance),
        interest_rate: parse_amount(&input.interest_rate),
        min_payment: parse_amount(&input.min_payment),
    };
    store.update_cards(|cards| cards.push(card));
    id
}

pub fn edit_card(store: &mut Store, id: CardId, patch: &CardPatch) -> bool {
    if !store.cards().iter().any(|c| c.id == id) {
        return false;
    }
    store.update_cards(|cards| {
        if let Some(card) = cards.iter_mut().find(|c| c.id == id) {
            if let Some(name) = &patch.name {
                card.name = name.clone();
            }
            if let Some(v) = &patch.balance {
                card.balance = parse_amount(v);
            }
            if let Some(v) = &patch.interest_rate {
                card.interest_rate = parse_amount(v);
            }
            if let Some(v) = &patch.min_payment {
                card.min_payment = parse_amount(v);
            }
        }
    });
    true
}

pub fn delete_card(store: &mut Store, id: CardId) -> bool {
    if !store.cards().iter().any(|c| c.id == id) {
        return false;
    }
    store.update_cards(|cards| cards.retain(|c| c.id != id));
    true
}

/// Blank input leaves the saved budget alone.
pub fn set_card_budget(store: &mut Store, budget: &str) -> bool {
    let budget = budget.trim();
    if budget.is_empty() {
        return false;
    }
    store.replace_card_budget(budget.to_string());
    true
}

pub fn card_budget(store: &Store) -> Decimal {
    parse_amount(store.card_budget())
}

pub fn total_balance(store: &Store) -> Decimal {
    store.cards().iter().map(|c| c.balance).sum()
}

pub fn total_min_payment(store: &Store) -> Decimal {
    store.cards().iter().map(|c| c.min_payment).sum()
}
