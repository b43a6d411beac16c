// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Once;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

use crate::models::parse_iso_date;

const NAME_FORBIDDEN: &str = "!@#$%¨&*()-=+[]";

static TRACING_INIT: Once = Once::new();

/// Installs the stderr log subscriber once. `RUST_LOG` takes precedence over
/// the default directive.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let default = if verbose { "cashbook=debug" } else { "cashbook=warn" };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    parse_iso_date(s.trim()).with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Amounts are stored as magnitudes; the kind carries the sign.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let amount = parse_decimal(s)?;
    if amount.is_sign_negative() && !amount.is_zero() {
        bail!("Amount must be non-negative, got {}", amount);
    }
    Ok(amount)
}

/// Names must be non-empty and free of digits and punctuation.
pub fn validate_name(s: &str) -> Result<String> {
    let name = s.trim();
    if name.is_empty() {
        bail!("Transaction name cannot be empty");
    }
    if name.chars().count() > 300 {
        bail!("Transaction name is longer than 300 characters");
    }
    if let Some(c) = name
        .chars()
        .find(|c| c.is_ascii_digit() || NAME_FORBIDDEN.contains(*c))
    {
        bail!("Transaction name '{}' contains invalid character '{}'", name, c);
    }
    Ok(name.to_string())
}

pub fn fmt_money(d: &Decimal, symbol: &str) -> String {
    format!("{} {:.2}", symbol, d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // Arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
