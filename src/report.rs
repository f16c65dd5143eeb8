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

//! CSV reports for admin mode.

use crate::journal::TransactionJournal;
use crate::registry::BankRegistry;
use csv::Writer;
use std::io::Write;

/// Write account balances to a CSV writer
///
/// Balances are rounded to 2 decimal places.
///
/// # CSV Format
///
/// Columns: `account, balance`
///
/// ```csv
/// account,balance
/// 1001,700.00
/// ```
///
/// # Errors
///
/// Returns a CSV error if writing fails.
pub fn write_accounts<W: Write>(registry: &BankRegistry, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);

    for account in registry.accounts() {
        wtr.serialize(account.as_ref())?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write journaled transactions to a CSV writer
///
/// # CSV Format
///
/// Columns: `id, type, amount, status, timestamp`
///
/// # Errors
///
/// Returns a CSV error if writing fails.
pub fn write_journal<W: Write>(journal: &TransactionJournal, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);

    for transaction in journal.snapshot() {
        wtr.serialize(transaction.as_ref())?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::Account;
    use crate::base::AccountNumber;
    use crate::transaction::{Transaction, TransactionKind};
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    #[test]
    fn accounts_report_has_header_and_rows() {
        let registry = BankRegistry::default();
        registry.add_account(Arc::new(Account::new(AccountNumber::from("1001"), dec!(700.00))));
        registry.add_account(Arc::new(Account::new(AccountNumber::from("1002"), dec!(12.5))));

        let mut output = Vec::new();
        write_accounts(&registry, &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output, "account,balance\n1001,700.00\n1002,12.5\n");
    }

    #[test]
    fn empty_registry_writes_nothing() {
        let mut output = Vec::new();
        write_accounts(&BankRegistry::default(), &mut output).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn journal_report_lists_settled_transactions() {
        let journal = TransactionJournal::new();
        let mut tx = Transaction::new(TransactionKind::Withdrawal, dec!(300.00));
        tx.fail().unwrap();
        let id = tx.id();
        journal.record(Arc::new(tx)).unwrap();

        let mut output = Vec::new();
        write_journal(&journal, &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("id,type,amount,status,timestamp"));
        let row = lines.next().unwrap();
        assert!(row.starts_with(&format!("{},Withdrawal,300.00,Failure,", id)));
        assert_eq!(lines.next(), None);
    }
}
