// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Turns a user-picked date into a year, month or day lookup.

use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use rusqlite::Connection;
use tracing::debug;

use crate::error::{LedgerError, Result};
use crate::models::{DATE_FORMAT, Transaction, parse_iso_date};
use crate::store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryScope {
    Year(i32),
    Month { year: i32, month: u32 },
    Day(NaiveDate),
}

/// How a date should be interpreted. `Auto` applies the first-of-period
/// heuristic; the others force a granularity, which is the only way to ask
/// for January 1st on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SearchMode {
    #[default]
    Auto,
    Day,
    Month,
    Year,
}

/// Jan 1 means the whole year, any other 1st means the whole month,
/// everything else is that day only.
pub fn classify(date: NaiveDate) -> QueryScope {
    if date.day() == 1 && date.month() == 1 {
        QueryScope::Year(date.year())
    } else if date.day() == 1 {
        QueryScope::Month {
            year: date.year(),
            month: date.month(),
        }
    } else {
        QueryScope::Day(date)
    }
}

pub fn parse_query_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    parse_iso_date(raw).ok_or_else(|| LedgerError::InvalidDate(raw.to_string()))
}

pub fn scope_for(raw: &str, mode: SearchMode) -> Result<QueryScope> {
    let date = parse_query_date(raw)?;
    Ok(match mode {
        SearchMode::Auto => classify(date),
        SearchMode::Day => QueryScope::Day(date),
        SearchMode::Month => QueryScope::Month {
            year: date.year(),
            month: date.month(),
        },
        SearchMode::Year => QueryScope::Year(date.year()),
    })
}

pub fn fetch(conn: &Connection, scope: QueryScope) -> Result<Vec<Transaction>> {
    match scope {
        QueryScope::Year(year) => store::get_by_year(conn, year),
        QueryScope::Month { year, month } => store::get_by_month(conn, year, month),
        QueryScope::Day(date) => store::get_by_exact_date(conn, &date.format(DATE_FORMAT).to_string()),
    }
}

/// Rejects a malformed date before the store is touched.
pub fn search(conn: &Connection, raw: &str, mode: SearchMode) -> Result<Vec<Transaction>> {
    let scope = scope_for(raw, mode)?;
    debug!(?scope, ?mode, "routing date search");
    fetch(conn, scope)
}
