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

//! Error types for ATM operations.
//!
//! Every variant is recoverable: the session reports it and moves back to a
//! safe menu. Console I/O failures are not represented here, they surface as
//! [`std::io::Error`] from [`AtmSession::run`](crate::AtmSession::run).

use thiserror::Error;

/// ATM operation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AtmError {
    /// Menu input outside the offered options
    #[error("invalid choice")]
    InvalidChoice,

    /// No card registered under the entered number
    #[error("card not found")]
    CardNotFound,

    /// Card failed validation on insertion
    #[error("invalid card")]
    InvalidCard,

    /// Wrong admin password or PIN
    #[error("authentication failed")]
    AuthFailure,

    /// Amount is zero, negative, finer than a cent or not a number
    #[error("invalid amount (must be positive, in whole cents)")]
    InvalidAmount,

    /// Credit would push the balance past the largest representable amount
    #[error("amount too large")]
    AmountTooLarge,

    /// Withdrawal would exceed the account balance
    #[error("insufficient funds in the account")]
    InsufficientFunds,

    /// Withdrawal would exceed the cash held by the machine
    #[error("insufficient cash in ATM")]
    InsufficientCash,

    /// Transaction status was already set
    #[error("transaction already settled")]
    AlreadySettled,
}
