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


use atm_demo_rs::{AdminSecret, AtmConfig, AtmSession, BankRegistry, Console};
use clap::Parser;
use rust_decimal::Decimal;
use std::io;
use std::process;
use std::sync::Arc;
use tracing::Level;

/// ATM - Console automated teller machine
///
/// Runs one ATM session on the terminal. Admins provision cards; users insert
/// a card, enter its PIN and withdraw, deposit or check their balance.
/// Diagnostics are logged to stderr.
#[derive(Parser, Debug)]
#[command(name = "atm")]
#[command(about = "A console ATM backed by an in-memory bank", long_about = None)]
struct Args {
    /// Identifier of this machine
    #[arg(long, default_value = "ATM1")]
    atm_id: String,

    /// Where the machine is installed
    #[arg(long, default_value = "Main Street")]
    location: String,

    /// Name of the bank whose cards are accepted
    #[arg(long, default_value = "Sample Bank")]
    bank_name: String,

    /// Cash loaded into the dispenser at startup
    #[arg(long, value_name = "AMOUNT", default_value = "5000")]
    cash_reserve: Decimal,

    /// Password that unlocks admin mode
    #[arg(long, default_value = AtmConfig::DEFAULT_ADMIN_PASSWORD)]
    admin_password: String,

    /// Log verbosity (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: Level,
}

impl Args {
    fn into_config(self) -> AtmConfig {
        AtmConfig {
            atm_id: self.atm_id,
            location: self.location,
            cash_reserve: self.cash_reserve,
            admin_secret: AdminSecret::new(self.admin_password),
        }
    }
}

fn main() {
    let args = Args::parse();

    // stdout carries the ATM screen, so logs go to stderr
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(io::stderr)
        .init();

    if args.cash_reserve < Decimal::ZERO {
        eprintln!("Error: cash reserve must not be negative: {}", args.cash_reserve);
        process::exit(1);
    }

    let registry = Arc::new(BankRegistry::new(args.bank_name.clone()));
    let config = args.into_config();
    let session = AtmSession::new(config, registry);

    let mut console = Console::new(io::stdin().lock(), io::stdout().lock());
    if let Err(e) = session.run(&mut console) {
        eprintln!("Error on console: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn defaults_match_factory_config() {
        let args = Args::parse_from(["atm"]);
        assert_eq!(args.log_level, Level::WARN);
        assert_eq!(args.bank_name, "Sample Bank");

        let config = args.into_config();
        assert_eq!(config.atm_id, "ATM1");
        assert_eq!(config.location, "Main Street");
        assert_eq!(config.cash_reserve, dec!(5000));
        assert!(config.admin_secret.verify("admin123"));
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "atm",
            "--cash-reserve",
            "250.50",
            "--admin-password",
            "s3cret",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.log_level, Level::DEBUG);

        let config = args.into_config();
        assert_eq!(config.cash_reserve, dec!(250.50));
        assert!(config.admin_secret.verify("s3cret"));
    }

    #[test]
    fn rejects_malformed_cash_reserve() {
        assert!(Args::try_parse_from(["atm", "--cash-reserve", "lots"]).is_err());
    }
}
