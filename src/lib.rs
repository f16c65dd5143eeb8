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


//! # ATM Demo
//!
//! This library models a single automated teller machine serving the cards
//! and accounts of one bank: card provisioning, card and PIN validation,
//! withdrawals, deposits and balance inquiries.
//!
//! ## Core Components
//!
//! - [`AtmSession`]: Menu state machine and banking operations of one machine
//! - [`BankRegistry`]: In-memory directory of cards and accounts
//! - [`Account`]: Account balance with serialized mutations
//! - [`Card`]: Card number, expiry and PIN bound to an account
//! - [`CashDispenser`]: Physical cash reserve of the machine
//! - [`Transaction`]: Record of one attempted operation
//! - [`AtmError`]: Recoverable operation errors
//!
//! ## Example
//!
//! ```
//! use atm_demo_rs::{AtmConfig, AtmSession, BankRegistry, CardNumber};
//! use rust_decimal_macros::dec;
//! use std::sync::Arc;
//!
//! let session = AtmSession::new(AtmConfig::default(), Arc::new(BankRegistry::default()));
//!
//! // Provision a card and sign in with it
//! session
//!     .provision_card(CardNumber::from("1001"), "12/30", 4321, dec!(1000.00))
//!     .unwrap();
//! let card = session.insert_card(&CardNumber::from("1001")).unwrap();
//! session.verify_pin(&card, 4321).unwrap();
//!
//! // Withdraw cash
//! session.withdraw(&card, dec!(300.00)).unwrap();
//! assert_eq!(card.account().check_balance(), dec!(700.00));
//! assert_eq!(session.dispenser().cash_available(), dec!(4700.00));
//! ```
//!
//! ## Thread Safety
//!
//! Accounts and the dispenser guard their state with locks, so a withdrawal
//! can never overdraw either of them even when several sessions share a
//! registry.

pub mod account;
mod base;
pub mod card;
pub mod config;
pub mod console;
mod dispenser;
pub mod error;
mod journal;
mod registry;
pub mod report;
mod session;
mod transaction;

pub use account::Account;
pub use base::{AccountNumber, CardNumber, TransactionId};
pub use card::{Card, Pin};
pub use config::{AdminSecret, AtmConfig};
pub use console::Console;
pub use dispenser::CashDispenser;
pub use error::AtmError;
pub use journal::{JournalError, TransactionJournal};
pub use registry::BankRegistry;
pub use session::{AtmSession, SessionState};
pub use transaction::{Receipt, Transaction, TransactionKind, TransactionStatus};
