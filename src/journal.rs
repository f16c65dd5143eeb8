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

//! In-memory journal of settled transactions.
//!
//! Keeps every record the session produced. Nothing is written to disk; the
//! journal lives as long as the session.

use crate::base::TransactionId;
use crate::transaction::{Transaction, TransactionStatus};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use thiserror::Error;

/// Why a record was refused by the journal.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalError {
    #[error("transaction {0} already journaled")]
    Duplicate(TransactionId),
    #[error("transaction {0} is still pending")]
    Unsettled(TransactionId),
}

/// A thread-safe transaction journal with duplicate detection.
///
/// Backed by a [`DashMap`] for O(1) duplicate checks and lookup by id.
#[derive(Debug, Default)]
pub struct TransactionJournal {
    records: DashMap<TransactionId, Arc<Transaction>>,
}

impl TransactionJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a settled record.
    ///
    /// # Errors
    ///
    /// - [`JournalError::Unsettled`] if the record is still pending.
    /// - [`JournalError::Duplicate`] if the id was journaled before.
    pub fn record(&self, transaction: Arc<Transaction>) -> Result<(), JournalError> {
        let id = transaction.id();
        if transaction.status() == TransactionStatus::Pending {
            return Err(JournalError::Unsettled(id));
        }

        // Entry API keeps check-and-insert atomic
        match self.records.entry(id) {
            Entry::Occupied(_) => Err(JournalError::Duplicate(id)),
            Entry::Vacant(entry) => {
                entry.insert(transaction);
                Ok(())
            }
        }
    }

    pub fn get(&self, id: TransactionId) -> Option<Arc<Transaction>> {
        self.records.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns every journaled record ordered by id, i.e. by creation.
    pub fn snapshot(&self) -> Vec<Arc<Transaction>> {
        let mut records: Vec<_> = self
            .records
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        records.sort_by_key(|tx| tx.id());
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TransactionKind;
    use rust_decimal_macros::dec;

    fn settled(kind: TransactionKind) -> Arc<Transaction> {
        let mut tx = Transaction::new(kind, dec!(10));
        tx.succeed().unwrap();
        Arc::new(tx)
    }

    #[test]
    fn snapshot_is_ordered_by_id() {
        let journal = TransactionJournal::new();
        let first = settled(TransactionKind::Deposit);
        let second = settled(TransactionKind::Withdrawal);
        journal.record(Arc::clone(&first)).unwrap();
        journal.record(Arc::clone(&second)).unwrap();

        let ids: Vec<_> = journal.snapshot().iter().map(|tx| tx.id()).collect();
        assert_eq!(ids, vec![first.id(), second.id()]);
        assert_eq!(journal.snapshot().len(), 2);
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let journal = TransactionJournal::new();
        let tx = settled(TransactionKind::Deposit);
        let id = tx.id();
        journal.record(Arc::clone(&tx)).unwrap();
        assert_eq!(journal.record(tx), Err(JournalError::Duplicate(id)));
        assert_eq!(journal.len(), 1);
    }

    #[test]
    fn pending_record_is_rejected() {
        let journal = TransactionJournal::new();
        let tx = Arc::new(Transaction::new(TransactionKind::BalanceInquiry, dec!(0)));
        let id = tx.id();
        assert_eq!(journal.record(tx), Err(JournalError::Unsettled(id)));
        assert!(journal.is_empty());
    }

    #[test]
    fn get_returns_recorded_transaction() {
        let journal = TransactionJournal::new();
        let tx = settled(TransactionKind::Withdrawal);
        journal.record(Arc::clone(&tx)).unwrap();

        let found = journal.get(tx.id()).unwrap();
        assert!(Arc::ptr_eq(&found, &tx));
        assert!(journal.get(TransactionId(u64::MAX)).is_none());
    }
}
