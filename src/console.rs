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

//! Screen and keypad.
//!
//! [`Console`] is line oriented: each prompt consumes one non-blank input
//! line. Any `BufRead`/`Write` pair works, which lets tests script a whole
//! session from a string.

use crate::AtmError;
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn display(&mut self, message: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", message.as_ref())
    }

    /// Prints a numbered option list, starting at 1.
    pub fn display_options(&mut self, options: &[&str]) -> io::Result<()> {
        writeln!(self.output, "Options:")?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, option)?;
        }
        Ok(())
    }

    /// Reads the next non-blank line, trimmed. `None` once input is exhausted.
    ///
    /// Bytes that are not UTF-8 are replaced, so a garbled line reaches the
    /// caller as ordinary invalid input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = Vec::new();
        loop {
            line.clear();
            if self.input.read_until(b'\n', &mut line)? == 0 {
                return Ok(None);
            }
            let decoded = String::from_utf8_lossy(&line);
            let trimmed = decoded.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_owned()));
            }
        }
    }

    /// Displays `message` and reads the answer.
    pub fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        self.display(message)?;
        self.output.flush()?;
        self.read_line()
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

/// Parses a numbered menu choice in `1..=options`.
pub fn parse_choice(input: &str, options: usize) -> Result<usize, AtmError> {
    match input.parse::<usize>() {
        Ok(choice) if (1..=options).contains(&choice) => Ok(choice),
        _ => Err(AtmError::InvalidChoice),
    }
}

/// Parses a PIN. Non-numeric input can never match a stored PIN.
pub fn parse_pin(input: &str) -> Result<u32, AtmError> {
    input.parse().map_err(|_| AtmError::AuthFailure)
}

/// Smallest unit the machine handles is one cent.
const CENT_PRECISION: u32 = 2;

/// Parses a strictly positive monetary amount in whole cents.
pub fn parse_amount(input: &str) -> Result<Decimal, AtmError> {
    match parse_money(input) {
        Ok(amount) if amount > Decimal::ZERO => Ok(amount),
        _ => Err(AtmError::InvalidAmount),
    }
}

/// Parses a monetary amount in whole cents. Sign is not checked.
///
/// Trailing zeros are ignored, so `300.100` is accepted and `300.001` is not.
pub fn parse_money(input: &str) -> Result<Decimal, AtmError> {
    let amount = Decimal::from_str(input).map_err(|_| AtmError::InvalidAmount)?;
    if amount.normalize().scale() > CENT_PRECISION {
        return Err(AtmError::InvalidAmount);
    }
    Ok(amount)
}
