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

//! Physical cash held by the machine.

use crate::AtmError;
use parking_lot::Mutex;
use rust_decimal::Decimal;

/// The machine's cash reserve, independent of any account.
#[derive(Debug)]
pub struct CashDispenser {
    cash_available: Mutex<Decimal>,
}

impl CashDispenser {
    /// Loads the dispenser. A negative reserve is clamped to zero.
    pub fn new(cash: Decimal) -> Self {
        Self {
            cash_available: Mutex::new(cash.max(Decimal::ZERO)),
        }
    }

    pub fn cash_available(&self) -> Decimal {
        *self.cash_available.lock()
    }

    /// Hands out `amount` if the reserve covers it.
    ///
    /// # Errors
    ///
    /// - [`AtmError::InvalidAmount`] if `amount` is not positive.
    /// - [`AtmError::InsufficientCash`] if `amount` exceeds the reserve.
    pub fn dispense_cash(&self, amount: Decimal) -> Result<(), AtmError> {
        if amount <= Decimal::ZERO {
            return Err(AtmError::InvalidAmount);
        }
        let mut cash = self.cash_available.lock();
        if *cash < amount {
            return Err(AtmError::InsufficientCash);
        }
        *cash -= amount;
        debug_assert!(*cash >= Decimal::ZERO, "cash reserve went negative: {}", *cash);
        Ok(())
    }
}
