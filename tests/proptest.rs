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


//! Property-based tests for accounts, the dispenser and transaction records.
//!
//! These tests verify invariants that should hold for any sequence of
//! operations.

use atm_demo_rs::{
    Account, AccountNumber, AtmConfig, AtmError, AtmSession, BankRegistry, CardNumber,
    CashDispenser, Transaction, TransactionKind,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

// =============================================================================
// Arbitrary Strategies
// =============================================================================

/// Generate a positive amount (0.01 to 100000.00 with 2 decimal places).
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..=10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_kind() -> impl Strategy<Value = TransactionKind> {
    prop_oneof![
        Just(TransactionKind::Withdrawal),
        Just(TransactionKind::Deposit),
        Just(TransactionKind::BalanceInquiry),
    ]
}

fn make_account(balance: Decimal) -> Account {
    Account::new(AccountNumber::from("1001"), balance)
}

// =============================================================================
// Account Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Overdrawing fails and leaves the balance alone.
    #[test]
    fn cannot_overdraw(
        balance in arb_amount(),
        extra in arb_amount(),
    ) {
        let account = make_account(balance);
        let result = account.withdraw(balance + extra);

        prop_assert_eq!(result, Err(AtmError::InsufficientFunds));
        prop_assert_eq!(account.check_balance(), balance);
    }

    /// A deposit raises the balance by exactly the deposited amount.
    #[test]
    fn deposit_adds_exact_amount(
        balance in arb_amount(),
        amount in arb_amount(),
    ) {
        let account = make_account(balance);
        account.deposit(amount).unwrap();
        prop_assert_eq!(account.check_balance(), balance + amount);
    }

    /// Withdrawing then depositing the same amount restores the balance.
    #[test]
    fn withdraw_deposit_round_trip(
        amount in arb_amount(),
        extra in arb_amount(),
    ) {
        let balance = amount + extra;
        let account = make_account(balance);

        account.withdraw(amount).unwrap();
        account.deposit(amount).unwrap();

        prop_assert_eq!(account.check_balance(), balance);
    }

    /// The balance is never negative after any sequence of withdrawals.
    #[test]
    fn balance_never_negative(
        balance in arb_amount(),
        withdrawals in prop::collection::vec(arb_amount(), 0..20),
    ) {
        let account = make_account(balance);
        for amount in withdrawals {
            let _ = account.withdraw(amount);
            prop_assert!(account.check_balance() >= Decimal::ZERO);
        }
    }
}

// =============================================================================
// Dispenser Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// The cash reserve never drops below zero and only shrinks on success.
    #[test]
    fn reserve_never_negative(
        reserve in arb_amount(),
        requests in prop::collection::vec(arb_amount(), 0..20),
    ) {
        let dispenser = CashDispenser::new(reserve);
        let mut expected = reserve;

        for amount in requests {
            match dispenser.dispense_cash(amount) {
                Ok(()) => expected -= amount,
                Err(error) => prop_assert_eq!(error, AtmError::InsufficientCash),
            }
            prop_assert!(dispenser.cash_available() >= Decimal::ZERO);
            prop_assert_eq!(dispenser.cash_available(), expected);
        }
    }
}

// =============================================================================
// Withdrawal Atomicity
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Account and reserve move together: both drop by the amount, or neither moves.
    #[test]
    fn withdrawal_is_all_or_nothing(
        balance in arb_amount(),
        reserve in arb_amount(),
        amount in arb_amount(),
    ) {
        let config = AtmConfig { cash_reserve: reserve, ..AtmConfig::default() };
        let session = AtmSession::new(config, Arc::new(BankRegistry::default()));
        let card = session
            .provision_card(CardNumber::from("1001"), "12/30", 1, balance)
            .unwrap();

        let result = session.withdraw(&card, amount);
        let debited = balance - card.account().check_balance();
        let dispensed = reserve - session.dispenser().cash_available();

        prop_assert_eq!(debited, dispensed);
        match result {
            Ok(_) => {
                prop_assert!(amount <= balance && amount <= reserve);
                prop_assert_eq!(debited, amount);
            }
            Err(AtmError::InsufficientFunds) => {
                prop_assert!(amount > balance);
                prop_assert_eq!(debited, Decimal::ZERO);
            }
            Err(AtmError::InsufficientCash) => {
                prop_assert!(amount <= balance && amount > reserve);
                prop_assert_eq!(debited, Decimal::ZERO);
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }
}

// =============================================================================
// Transaction Records
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Ids strictly increase whatever the kind or outcome.
    #[test]
    fn transaction_ids_strictly_increase(
        attempts in prop::collection::vec((arb_kind(), arb_amount(), any::<bool>()), 1..50),
    ) {
        let mut previous = None;
        for (kind, amount, succeed) in attempts {
            let mut tx = Transaction::new(kind, amount);
            if succeed {
                tx.succeed().unwrap();
            } else {
                tx.fail().unwrap();
            }
            if let Some(previous) = previous {
                prop_assert!(tx.id() > previous);
            }
            previous = Some(tx.id());
        }
    }

    /// A PIN only matches itself.
    #[test]
    fn pin_matches_only_itself(
        pin in 0u32..100_000,
        guess in 0u32..100_000,
    ) {
        let session = AtmSession::new(AtmConfig::default(), Arc::new(BankRegistry::default()));
        let card = session
            .provision_card(CardNumber::from("1001"), "12/30", pin, Decimal::ZERO)
            .unwrap();

        prop_assert_eq!(card.validate_pin(guess), pin == guess);
        prop_assert!(!card.validate_pin(pin.wrapping_add(1)));
    }
}
