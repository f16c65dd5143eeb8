// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Bank directory of cards and accounts.
//!
//! The [`BankRegistry`] is the in-memory book of one bank: every provisioned
//! account and every card issued against it.
//!
//! # Lookup
//!
//! Cards are found by a linear scan in registration order. Card numbers are
//! not required to be unique; when several cards share a number the one
//! registered first is returned.

use crate::account::Account;
use crate::base::{AccountNumber, CardNumber};
use crate::card::Card;
use parking_lot::RwLock;
use std::sync::Arc;

/// In-memory directory of cards and accounts.
///
/// # Invariants
///
/// - Entries are never removed.
/// - Lookups return the earliest registered match.
#[derive(Debug)]
pub struct BankRegistry {
    name: String,
    /// Cards in registration order.
    cards: RwLock<Vec<Arc<Card>>>,
    /// Accounts in registration order.
    accounts: RwLock<Vec<Arc<Account>>>,
}

impl BankRegistry {
    /// Creates an empty registry for the named bank.
    pub fn new(name: impl Into<String>) -> Self {
        BankRegistry {
            name: name.into(),
            cards: RwLock::new(Vec::new()),
            accounts: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_card(&self, card: Arc<Card>) {
        self.cards.write().push(card);
    }

    pub fn add_account(&self, account: Arc<Account>) {
        self.accounts.write().push(account);
    }

    /// Retrieves a card by number.
    ///
    /// Returns `None` if no card carries the given number.
    pub fn find_card_by_number(&self, number: &CardNumber) -> Option<Arc<Card>> {
        self.cards
            .read()
            .iter()
            .find(|card| card.number() == number)
            .cloned()
    }

    /// Retrieves an account by number.
    pub fn find_account(&self, number: &AccountNumber) -> Option<Arc<Account>> {
        self.accounts
            .read()
            .iter()
            .find(|account| account.number() == number)
            .cloned()
    }

    /// Returns all accounts in registration order.
    ///
    /// Useful for generating account reports.
    pub fn accounts(&self) -> Vec<Arc<Account>> {
        self.accounts.read().clone()
    }

    pub fn card_count(&self) -> usize {
        self.cards.read().len()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.read().len()
    }
}

impl Default for BankRegistry {
    fn default() -> Self {
        Self::new("Sample Bank")
    }
}
