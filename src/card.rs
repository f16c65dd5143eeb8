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

//! Bank cards.

use crate::account::Account;
use crate::base::CardNumber;
use std::fmt;
use std::sync::Arc;

/// Personal identification number.
///
/// Stored and compared in plain text. Swapping this for a salted hash only
/// has to touch [`Pin::matches`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Pin(u32);

impl Pin {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn matches(&self, input: u32) -> bool {
        self.0 == input
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}

/// A card bound to exactly one account.
#[derive(Debug)]
pub struct Card {
    number: CardNumber,
    expiry_date: String,
    pin: Pin,
    account: Arc<Account>,
}

impl Card {
    pub fn new(
        number: CardNumber,
        expiry_date: impl Into<String>,
        pin: Pin,
        account: Arc<Account>,
    ) -> Self {
        Self {
            number,
            expiry_date: expiry_date.into(),
            pin,
            account,
        }
    }

    pub fn number(&self) -> &CardNumber {
        &self.number
    }

    /// Expiry date as entered at provisioning, conventionally `MM/YY`.
    pub fn expiry_date(&self) -> &str {
        &self.expiry_date
    }

    pub fn account(&self) -> &Arc<Account> {
        &self.account
    }

    /// Checks the card itself before a PIN is requested.
    ///
    /// Every card is accepted; expiry and format checks hook in here.
    pub fn validate(&self) -> bool {
        true
    }

    pub fn validate_pin(&self, input: u32) -> bool {
        self.pin.matches(input)
    }
}
