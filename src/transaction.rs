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

//! Transaction records.
//!
//! A [`Transaction`] records the outcome of one operation; it never touches an
//! account itself. Status follows a one-way state machine:
//! - [`Pending`](TransactionStatus::Pending) → [`Success`](TransactionStatus::Success)
//! - [`Pending`](TransactionStatus::Pending) → [`Failure`](TransactionStatus::Failure)

use crate::AtmError;
use crate::base::TransactionId;
use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum TransactionKind {
    Withdrawal,
    Deposit,
    BalanceInquiry,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Withdrawal => "Withdrawal",
            Self::Deposit => "Deposit",
            Self::BalanceInquiry => "Balance Inquiry",
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum TransactionStatus {
    Pending,
    Success,
    Failure,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One attempted ATM operation.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    id: TransactionId,
    #[serde(rename = "type")]
    kind: TransactionKind,
    amount: Decimal,
    status: TransactionStatus,
    timestamp: DateTime<Local>,
}

impl Transaction {
    /// Opens a pending record with a fresh id and the current time.
    pub fn new(kind: TransactionKind, amount: Decimal) -> Self {
        Self {
            id: TransactionId::next(),
            kind,
            amount,
            status: TransactionStatus::Pending,
            timestamp: Local::now(),
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn succeed(&mut self) -> Result<(), AtmError> {
        self.settle(TransactionStatus::Success)
    }

    pub fn fail(&mut self) -> Result<(), AtmError> {
        self.settle(TransactionStatus::Failure)
    }

    /// Settles the record from the outcome of the operation it describes.
    pub fn settle_with<T>(&mut self, outcome: &Result<T, AtmError>) -> Result<(), AtmError> {
        match outcome {
            Ok(_) => self.succeed(),
            Err(_) => self.fail(),
        }
    }

    fn settle(&mut self, status: TransactionStatus) -> Result<(), AtmError> {
        if self.status != TransactionStatus::Pending {
            return Err(AtmError::AlreadySettled);
        }
        self.status = status;
        Ok(())
    }

    pub fn receipt(&self) -> Receipt<'_> {
        Receipt(self)
    }
}

/// Printable receipt for a [`Transaction`].
pub struct Receipt<'a>(&'a Transaction);

impl fmt::Display for Receipt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tx = self.0;
        writeln!(f, "Receipt:")?;
        writeln!(f, "Transaction ID: {}", tx.id)?;
        writeln!(f, "Transaction Type: {}", tx.kind)?;
        writeln!(f, "Amount: {:.2}", tx.amount)?;
        writeln!(f, "Status: {}", tx.status)?;
        write!(f, "Timestamp: {}", tx.timestamp.format("%a %b %e %H:%M:%S %Y"))
    }
}
