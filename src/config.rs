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

//! Machine configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fmt;

/// Shared secret that unlocks admin mode.
///
/// Compared in plain text; [`AdminSecret::verify`] is the single place a
/// hashed comparison would go.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminSecret(String);

impl AdminSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn verify(&self, input: &str) -> bool {
        self.0 == input
    }
}

impl fmt::Debug for AdminSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminSecret(****)")
    }
}

/// Identity and starting state of one ATM.
///
/// The bank the machine serves is named by its [`BankRegistry`](crate::BankRegistry).
#[derive(Debug, Clone)]
pub struct AtmConfig {
    pub atm_id: String,
    pub location: String,
    /// Cash loaded into the dispenser at startup.
    pub cash_reserve: Decimal,
    pub admin_secret: AdminSecret,
}

impl AtmConfig {
    pub const DEFAULT_CASH_RESERVE: Decimal = dec!(5000);
    pub const DEFAULT_ADMIN_PASSWORD: &'static str = "admin123";
}

impl Default for AtmConfig {
    fn default() -> Self {
        Self {
            atm_id: "ATM1".to_owned(),
            location: "Main Street".to_owned(),
            cash_reserve: Self::DEFAULT_CASH_RESERVE,
            admin_secret: AdminSecret::new(Self::DEFAULT_ADMIN_PASSWORD),
        }
    }
}
