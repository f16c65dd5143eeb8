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

//! ATM session.
//!
//! [`AtmSession`] owns everything one machine needs: its configuration, the
//! cash dispenser, the transaction journal and a handle to the bank registry.
//! It exposes the banking operations directly and drives them from the
//! console through a state machine:
//!
//! ```text
//!  StartMenu ──1──► AdminAuth ──ok──► AdminMode ──exit──► StartMenu
//!      │                └──bad──► StartMenu
//!      └──2──► UserCardEntry ──found──► PinEntry ──ok──► MainMenu ◄──► TransactionDispatch
//!                   └──missing──► StartMenu  └──bad──► Ejected        └──eject──► Ejected
//!
//!  Ejected ──► StartMenu
//! ```
//!
//! The session ends when the console input is exhausted.

use crate::AtmError;
use crate::account::Account;
use crate::base::{AccountNumber, CardNumber};
use crate::card::{Card, Pin};
use crate::config::AtmConfig;
use crate::console::{Console, parse_amount, parse_choice, parse_money, parse_pin};
use crate::dispenser::CashDispenser;
use crate::journal::TransactionJournal;
use crate::registry::BankRegistry;
use crate::report;
use crate::transaction::{Transaction, TransactionKind};
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::{debug, info, warn};

const START_OPTIONS: &[&str] = &["Admin Mode", "User Mode"];
const ADMIN_OPTIONS: &[&str] = &[
    "Add Card",
    "Exit Admin Mode",
    "Accounts Report",
    "Transaction Journal",
];
const MAIN_OPTIONS: &[&str] = &["Withdraw", "Deposit", "Check Balance", "Eject Card"];

/// Where the session is in the menu flow.
#[derive(Debug, Clone)]
pub enum SessionState {
    StartMenu,
    AdminAuth,
    AdminMode,
    UserCardEntry,
    PinEntry(Arc<Card>),
    MainMenu(Arc<Card>),
    TransactionDispatch(Arc<Card>, TransactionKind),
    Ejected,
}

/// One ATM serving one user at a time.
#[derive(Debug)]
pub struct AtmSession {
    config: AtmConfig,
    registry: Arc<BankRegistry>,
    dispenser: CashDispenser,
    journal: TransactionJournal,
}

impl AtmSession {
    pub fn new(config: AtmConfig, registry: Arc<BankRegistry>) -> Self {
        let dispenser = CashDispenser::new(config.cash_reserve);
        Self {
            config,
            registry,
            dispenser,
            journal: TransactionJournal::new(),
        }
    }

    pub fn config(&self) -> &AtmConfig {
        &self.config
    }

    pub fn registry(&self) -> &BankRegistry {
        &self.registry
    }

    pub fn dispenser(&self) -> &CashDispenser {
        &self.dispenser
    }

    pub fn journal(&self) -> &TransactionJournal {
        &self.journal
    }

    // === Operations ===

    /// Opens an account and issues a card for it.
    ///
    /// The account is numbered after the card.
    ///
    /// # Errors
    ///
    /// [`AtmError::InvalidAmount`] if `opening_balance` is negative.
    pub fn provision_card(
        &self,
        number: CardNumber,
        expiry_date: &str,
        pin: u32,
        opening_balance: Decimal,
    ) -> Result<Arc<Card>, AtmError> {
        if opening_balance < Decimal::ZERO {
            return Err(AtmError::InvalidAmount);
        }

        let account = Arc::new(Account::new(AccountNumber::from(&number), opening_balance));
        self.registry.add_account(Arc::clone(&account));

        let card = Arc::new(Card::new(number, expiry_date, Pin::new(pin), account));
        self.registry.add_card(Arc::clone(&card));

        info!(card = %card.number(), "card provisioned");
        Ok(card)
    }

    /// Looks up and validates an inserted card.
    ///
    /// # Errors
    ///
    /// - [`AtmError::CardNotFound`] if no card carries `number`.
    /// - [`AtmError::InvalidCard`] if the card fails validation.
    pub fn insert_card(&self, number: &CardNumber) -> Result<Arc<Card>, AtmError> {
        let card = self
            .registry
            .find_card_by_number(number)
            .ok_or(AtmError::CardNotFound)?;
        if !card.validate() {
            return Err(AtmError::InvalidCard);
        }
        debug!(card = %number, "card inserted");
        Ok(card)
    }

    pub fn verify_pin(&self, card: &Card, pin: u32) -> Result<(), AtmError> {
        if card.validate_pin(pin) {
            Ok(())
        } else {
            warn!(card = %card.number(), "PIN rejected");
            Err(AtmError::AuthFailure)
        }
    }

    pub fn verify_admin(&self, password: &str) -> Result<(), AtmError> {
        if self.config.admin_secret.verify(password) {
            Ok(())
        } else {
            warn!("admin password rejected");
            Err(AtmError::AuthFailure)
        }
    }

    /// Debits the card's account and dispenses the cash as one step.
    ///
    /// The account balance is checked first, then the cash reserve; the
    /// account is only debited once the cash has been dispensed. Either both
    /// resources change or neither does.
    ///
    /// The attempt is journaled whatever the outcome.
    ///
    /// # Errors
    ///
    /// - [`AtmError::InvalidAmount`] if `amount` is not positive.
    /// - [`AtmError::InsufficientFunds`] if `amount` exceeds the balance.
    /// - [`AtmError::InsufficientCash`] if `amount` exceeds the cash reserve.
    pub fn withdraw(&self, card: &Card, amount: Decimal) -> Result<Arc<Transaction>, AtmError> {
        let mut transaction = Transaction::new(TransactionKind::Withdrawal, amount);
        let outcome = card
            .account()
            .withdraw_with(amount, || self.dispenser.dispense_cash(amount));
        transaction.settle_with(&outcome)?;
        let transaction = self.record(transaction);

        match outcome {
            Ok(()) => {
                info!(card = %card.number(), tx = %transaction.id(), %amount, "withdrawal committed");
                Ok(transaction)
            }
            Err(error) => {
                warn!(card = %card.number(), tx = %transaction.id(), %amount, %error, "withdrawal failed");
                Err(error)
            }
        }
    }

    /// Credits the card's account. The attempt is journaled.
    ///
    /// # Errors
    ///
    /// - [`AtmError::InvalidAmount`] if `amount` is not positive.
    /// - [`AtmError::AmountTooLarge`] if the balance would overflow.
    pub fn deposit(&self, card: &Card, amount: Decimal) -> Result<Arc<Transaction>, AtmError> {
        let mut transaction = Transaction::new(TransactionKind::Deposit, amount);
        let outcome = card.account().deposit(amount);
        transaction.settle_with(&outcome)?;
        let transaction = self.record(transaction);

        match outcome {
            Ok(()) => {
                info!(card = %card.number(), tx = %transaction.id(), %amount, "deposit committed");
                Ok(transaction)
            }
            Err(error) => {
                warn!(card = %card.number(), tx = %transaction.id(), %amount, %error, "deposit failed");
                Err(error)
            }
        }
    }

    /// Reads the card's balance, journaling the inquiry with the balance as its amount.
    pub fn check_balance(&self, card: &Card) -> Result<Decimal, AtmError> {
        let balance = card.account().check_balance();
        let mut transaction = Transaction::new(TransactionKind::BalanceInquiry, balance);
        transaction.succeed()?;
        self.record(transaction);
        Ok(balance)
    }

    fn record(&self, transaction: Transaction) -> Arc<Transaction> {
        let transaction = Arc::new(transaction);
        if let Err(error) = self.journal.record(Arc::clone(&transaction)) {
            warn!(%error, "transaction not journaled");
        }
        transaction
    }

    // === Console state machine ===

    /// Runs the menu loop until the console input is exhausted.
    ///
    /// # Errors
    ///
    /// Only console I/O errors are returned; every banking error is reported
    /// on the console and recovered from.
    pub fn run<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> io::Result<()> {
        info!(atm = %self.config.atm_id, location = %self.config.location, "session started");
        let mut state = SessionState::StartMenu;
        while let Some(next) = self.step(state, console)? {
            state = next;
        }
        info!(atm = %self.config.atm_id, "input closed, session ended");
        Ok(())
    }

    /// Performs one transition. `None` means the input ran out.
    pub fn step<R: BufRead, W: Write>(
        &self,
        state: SessionState,
        console: &mut Console<R, W>,
    ) -> io::Result<Option<SessionState>> {
        debug!(?state, "step");
        match state {
            SessionState::StartMenu => self.start_menu(console),
            SessionState::AdminAuth => self.admin_auth(console),
            SessionState::AdminMode => self.admin_mode(console),
            SessionState::UserCardEntry => self.user_card_entry(console),
            SessionState::PinEntry(card) => self.pin_entry(card, console),
            SessionState::MainMenu(card) => self.main_menu(card, console),
            SessionState::TransactionDispatch(card, kind) => {
                self.dispatch(card, kind, console)
            }
            SessionState::Ejected => {
                console.display("Ejecting card...")?;
                Ok(Some(SessionState::StartMenu))
            }
        }
    }

    fn start_menu<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> io::Result<Option<SessionState>> {
        console.display(format!("Welcome to the {} ATM!", self.registry.name()))?;
        console.display_options(START_OPTIONS)?;
        let Some(input) = console.read_line()? else {
            return Ok(None);
        };

        let next = match parse_choice(&input, START_OPTIONS.len()) {
            Ok(1) => SessionState::AdminAuth,
            Ok(_) => SessionState::UserCardEntry,
            Err(_) => {
                console.display("Invalid choice. Please try again.")?;
                SessionState::StartMenu
            }
        };
        Ok(Some(next))
    }

    fn admin_auth<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> io::Result<Option<SessionState>> {
        let Some(password) = console.prompt("Enter admin password:")? else {
            return Ok(None);
        };

        match self.verify_admin(&password) {
            Ok(()) => Ok(Some(SessionState::AdminMode)),
            Err(_) => {
                console.display("Incorrect password. Returning to main menu.")?;
                Ok(Some(SessionState::StartMenu))
            }
        }
    }

    fn admin_mode<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> io::Result<Option<SessionState>> {
        console.display("Admin Mode")?;
        console.display_options(ADMIN_OPTIONS)?;
        let Some(input) = console.read_line()? else {
            return Ok(None);
        };

        match parse_choice(&input, ADMIN_OPTIONS.len()) {
            Ok(1) => return self.add_new_card(console),
            Ok(2) => {
                console.display("Exiting Admin Mode...")?;
                return Ok(Some(SessionState::StartMenu));
            }
            Ok(3) => report::write_accounts(&self.registry, console.writer())?,
            Ok(_) => report::write_journal(&self.journal, console.writer())?,
            Err(_) => console.display("Invalid choice.")?,
        }
        Ok(Some(SessionState::AdminMode))
    }

    fn add_new_card<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> io::Result<Option<SessionState>> {
        let Some(number) = console.prompt("Enter card number:")? else {
            return Ok(None);
        };
        let Some(expiry) = console.prompt("Enter expiry date (MM/YY):")? else {
            return Ok(None);
        };
        let Some(pin) = console.prompt("Set a PIN for the card:")? else {
            return Ok(None);
        };
        let Ok(pin) = pin.parse::<u32>() else {
            console.display("Invalid PIN. Card not added.")?;
            return Ok(Some(SessionState::AdminMode));
        };
        let Some(balance) = console.prompt("Enter initial balance for the account:")? else {
            return Ok(None);
        };

        // Zero is a valid opening balance, only negatives are refused.
        let provisioned = parse_money(&balance)
            .and_then(|balance| self.provision_card(CardNumber(number), &expiry, pin, balance));

        match provisioned {
            Ok(_) => console.display("New card added successfully!")?,
            Err(error) => console.display(format!("Card not added: {error}."))?,
        }
        Ok(Some(SessionState::AdminMode))
    }

    fn user_card_entry<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> io::Result<Option<SessionState>> {
        let Some(number) = console.prompt("Insert your card (Enter card number):")? else {
            return Ok(None);
        };

        match self.insert_card(&CardNumber(number)) {
            Ok(card) => Ok(Some(SessionState::PinEntry(card))),
            Err(AtmError::InvalidCard) => {
                console.display("Invalid Card. Ejecting card.")?;
                Ok(Some(SessionState::Ejected))
            }
            Err(_) => {
                console.display("Card not found. Returning to main menu.")?;
                Ok(Some(SessionState::StartMenu))
            }
        }
    }

    fn pin_entry<R: BufRead, W: Write>(
        &self,
        card: Arc<Card>,
        console: &mut Console<R, W>,
    ) -> io::Result<Option<SessionState>> {
        let Some(input) = console.prompt("Card Validated. Please enter your PIN:")? else {
            return Ok(None);
        };

        let verified = parse_pin(&input).and_then(|pin| self.verify_pin(&card, pin));
        match verified {
            Ok(()) => Ok(Some(SessionState::MainMenu(card))),
            Err(_) => {
                console.display("Invalid PIN. Ejecting card.")?;
                Ok(Some(SessionState::Ejected))
            }
        }
    }

    fn main_menu<R: BufRead, W: Write>(
        &self,
        card: Arc<Card>,
        console: &mut Console<R, W>,
    ) -> io::Result<Option<SessionState>> {
        console.display("Select transaction or eject card:")?;
        console.display_options(MAIN_OPTIONS)?;
        let Some(input) = console.read_line()? else {
            return Ok(None);
        };

        let next = match parse_choice(&input, MAIN_OPTIONS.len()) {
            Ok(1) => SessionState::TransactionDispatch(card, TransactionKind::Withdrawal),
            Ok(2) => SessionState::TransactionDispatch(card, TransactionKind::Deposit),
            Ok(3) => SessionState::TransactionDispatch(card, TransactionKind::BalanceInquiry),
            Ok(_) => SessionState::Ejected,
            Err(_) => {
                console.display("Invalid option.")?;
                SessionState::MainMenu(card)
            }
        };
        Ok(Some(next))
    }

    fn dispatch<R: BufRead, W: Write>(
        &self,
        card: Arc<Card>,
        kind: TransactionKind,
        console: &mut Console<R, W>,
    ) -> io::Result<Option<SessionState>> {
        match kind {
            TransactionKind::Withdrawal => {
                let Some(input) = console.prompt("Enter amount to withdraw:")? else {
                    return Ok(None);
                };
                match parse_amount(&input).and_then(|amount| self.withdraw(&card, amount))
                {
                    Ok(transaction) => {
                        console.display(format!("Dispensed {:.2}", transaction.amount()))?;
                        console.display("Transaction successful.")?;
                        console.display(transaction.receipt().to_string())?;
                    }
                    Err(error) => {
                        console.display(format!("Withdrawal failed: {error}."))?;
                        console.display("Withdrawal failed. Transaction not completed.")?;
                    }
                }
            }
            TransactionKind::Deposit => {
                let Some(input) = console.prompt("Enter amount to deposit:")? else {
                    return Ok(None);
                };
                match parse_amount(&input).and_then(|amount| self.deposit(&card, amount)) {
                    Ok(transaction) => {
                        console.display("Deposit successful.")?;
                        console.display(transaction.receipt().to_string())?;
                    }
                    Err(error) => console.display(format!("Deposit failed: {error}."))?,
                }
            }
            TransactionKind::BalanceInquiry => match self.check_balance(&card) {
                Ok(balance) => console.display(format!("Your balance is: {balance:.2}"))?,
                Err(error) => console.display(format!("Balance unavailable: {error}."))?,
            },
        }
        Ok(Some(SessionState::MainMenu(card)))
    }
}
