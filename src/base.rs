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

//! Core identifier types for cards, accounts and transactions.

use serde::Serialize;
use std::fmt;

/// Number printed on a card and typed in at the card prompt.
///
/// Card numbers are opaque strings; no format or checksum is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardNumber(pub String);

impl CardNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardNumber {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a bank account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AccountNumber(pub String);

impl AccountNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccountNumber {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<&CardNumber> for AccountNumber {
    /// Provisioned accounts are numbered after the card issued for them.
    fn from(card: &CardNumber) -> Self {
        Self(card.0.clone())
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a transaction.
///
/// Wraps a `u64`. Identifiers are handed out by a process-wide counter and
/// are never reused, see [`TransactionId::next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TransactionId(pub u64);

impl TransactionId {
    /// Allocates the next identifier. The first one handed out is `1`.
    pub(crate) fn next() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};

        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_ids_increase() {
        let first = TransactionId::next();
        let second = TransactionId::next();
        assert!(second > first);
    }

    #[test]
    fn account_number_follows_card_number() {
        let card = CardNumber::from("1001");
        assert_eq!(AccountNumber::from(&card).as_str(), "1001");
    }
}
