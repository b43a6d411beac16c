// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{get_currency, set_currency};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("currency", sub)) = m.subcommand() {
        match sub.get_one::<String>("symbol") {
            Some(symbol) => {
                set_currency(conn, symbol)?;
                println!("Currency set to {}", symbol.trim());
            }
            None => println!("{}", get_currency(conn)?),
        }
    }
    Ok(())
}
