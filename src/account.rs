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

//! Account management.
//!
//! An [`Account`] holds a single balance. All mutations go through one lock,
//! so two withdrawals against the same account can never both pass the funds
//! check.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use atm_demo_rs::{Account, AccountNumber};
//!
//! let account = Account::new(AccountNumber::from("1001"), dec!(100.00));
//! account.withdraw(dec!(40.00)).unwrap();
//! assert_eq!(account.check_balance(), dec!(60.00));
//! ```

use crate::AtmError;
use crate::base::AccountNumber;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeStruct, Serializer};

#[derive(Debug)]
struct AccountData {
    balance: Decimal,
}

impl AccountData {
    fn assert_invariants(&self) {
        debug_assert!(
            self.balance >= Decimal::ZERO,
            "Invariant violated: balance went negative: {}",
            self.balance
        );
    }

    fn deposit(&mut self, amount: Decimal) -> Result<(), AtmError> {
        if amount <= Decimal::ZERO {
            return Err(AtmError::InvalidAmount);
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(AtmError::AmountTooLarge)?;
        self.assert_invariants();
        Ok(())
    }

    fn ensure_funds(&self, amount: Decimal) -> Result<(), AtmError> {
        if amount <= Decimal::ZERO {
            return Err(AtmError::InvalidAmount);
        }
        if self.balance < amount {
            return Err(AtmError::InsufficientFunds);
        }
        Ok(())
    }

    fn withdraw(&mut self, amount: Decimal) -> Result<(), AtmError> {
        self.ensure_funds(amount)?;
        self.balance -= amount;
        self.assert_invariants();
        Ok(())
    }
}

/// Bank account.
#[derive(Debug)]
pub struct Account {
    number: AccountNumber,
    inner: Mutex<AccountData>,
}

impl Account {
    const DECIMAL_PRECISION: u32 = 2;

    /// Opens an account. A negative opening balance is clamped to zero.
    pub fn new(number: AccountNumber, opening_balance: Decimal) -> Self {
        Self {
            number,
            inner: Mutex::new(AccountData {
                balance: opening_balance.max(Decimal::ZERO),
            }),
        }
    }

    pub fn number(&self) -> &AccountNumber {
        &self.number
    }

    pub fn check_balance(&self) -> Decimal {
        self.inner.lock().balance
    }

    /// Credits the account.
    ///
    /// # Errors
    ///
    /// - [`AtmError::InvalidAmount`] if `amount` is not positive.
    /// - [`AtmError::AmountTooLarge`] if the new balance would overflow.
    ///
    /// On error the balance is left untouched.
    pub fn deposit(&self, amount: Decimal) -> Result<(), AtmError> {
        self.inner.lock().deposit(amount)
    }

    /// Debits the account if the balance covers `amount`.
    ///
    /// # Errors
    ///
    /// - [`AtmError::InvalidAmount`] if `amount` is not positive.
    /// - [`AtmError::InsufficientFunds`] if `amount` exceeds the balance.
    ///
    /// On error the balance is left untouched.
    pub fn withdraw(&self, amount: Decimal) -> Result<(), AtmError> {
        self.inner.lock().withdraw(amount)
    }

    /// Debits the account only once `commit` has succeeded.
    ///
    /// The funds check runs first; `commit` is only invoked when the balance
    /// covers `amount`, and the debit only happens when `commit` returns `Ok`.
    /// The account lock is held throughout, so the check, the external step and
    /// the debit form a single unit.
    pub fn withdraw_with<F>(&self, amount: Decimal, commit: F) -> Result<(), AtmError>
    where
        F: FnOnce() -> Result<(), AtmError>,
    {
        let mut data = self.inner.lock();
        data.ensure_funds(amount)?;
        commit()?;
        data.withdraw(amount)
    }
}

impl Serialize for Account {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let data = self.inner.lock();
        let mut state = serializer.serialize_struct("Account", 2)?;
        state.serialize_field("account", &self.number)?;
        state.serialize_field(
            "balance",
            &data.balance.round_dp(Account::DECIMAL_PRECISION),
        )?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn account(balance: Decimal) -> Account {
        Account::new(AccountNumber::from("1001"), balance)
    }

    #[test]
    fn negative_opening_balance_is_clamped() {
        assert_eq!(account(dec!(-5)).check_balance(), Decimal::ZERO);
    }

    #[test]
    fn withdraw_with_debits_after_commit() {
        let account = account(dec!(100.00));
        account.withdraw_with(dec!(30.00), || Ok(())).unwrap();
        assert_eq!(account.check_balance(), dec!(70.00));
    }

    #[test]
    fn withdraw_with_skips_commit_when_funds_are_short() {
        let account = account(dec!(10.00));
        let mut called = false;
        let result = account.withdraw_with(dec!(30.00), || {
            called = true;
            Ok(())
        });
        assert_eq!(result, Err(AtmError::InsufficientFunds));
        assert!(!called);
        assert_eq!(account.check_balance(), dec!(10.00));
    }

    #[test]
    fn withdraw_with_leaves_balance_when_commit_fails() {
        let account = account(dec!(100.00));
        let result = account.withdraw_with(dec!(30.00), || Err(AtmError::InsufficientCash));
        assert_eq!(result, Err(AtmError::InsufficientCash));
        assert_eq!(account.check_balance(), dec!(100.00));
    }

    #[test]
    fn overflowing_deposit_leaves_balance() {
        let account = account(Decimal::MAX);
        assert_eq!(account.deposit(dec!(1)), Err(AtmError::AmountTooLarge));
        assert_eq!(account.check_balance(), Decimal::MAX);
    }

    // === Serialization Tests ===

    #[test]
    fn serializer_rounds_to_two_decimal_places() {
        let account = account(dec!(0));
        account.inner.lock().balance = dec!(123.456);

        let json = serde_json::to_string(&account).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["account"], "1001");
        assert_eq!(parsed["balance"].as_str().unwrap(), "123.46");
    }

    #[test]
    fn serializer_uses_bankers_rounding() {
        let account = account(dec!(0));
        // 0.125 rounds half to even
        account.inner.lock().balance = dec!(0.125);

        let json = serde_json::to_string(&account).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["balance"].as_str().unwrap(), "0.12");
    }
}
