// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Signed totals grouped by calendar period.
//!
//! Week numbers are Sunday-first, the same numbering as `strftime('%U')`:
//! every day before the first Sunday of the year falls in week `00`, and the
//! year part of a week key is always the calendar year of the date.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::error::{LedgerError, Result};
use crate::models::{Kind, Transaction};
use crate::store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Granularity {
    Week,
    Month,
    Year,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Year => "year",
        })
    }
}

impl FromStr for Granularity {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "week" | "weekly" => Ok(Granularity::Week),
            "month" | "monthly" => Ok(Granularity::Month),
            "year" | "yearly" => Ok(Granularity::Year),
            other => Err(LedgerError::InvalidInput(format!(
                "Unknown period '{}' (use week|month|year)",
                other
            ))),
        }
    }
}

/// Totals for one calendar bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodTotal {
    pub key: String,
    pub inflow: Decimal,
    pub outflow: Decimal,
    pub total: Decimal,
    /// Every record in the bucket, including ones of unknown kind.
    pub count: usize,
}

impl PeriodTotal {
    fn empty(key: String) -> Self {
        Self {
            key,
            inflow: Decimal::ZERO,
            outflow: Decimal::ZERO,
            total: Decimal::ZERO,
            count: 0,
        }
    }
}

/// Sunday-first week of the year, 0..=53.
pub fn sunday_week(date: NaiveDate) -> u32 {
    (date.ordinal0() + 7 - date.weekday().num_days_from_sunday()) / 7
}

/// Zero-padded key: `YYYY`, `YYYY-MM` or `YYYY-Www`. Keys of one granularity
/// sort chronologically as plain strings.
pub fn period_key(date: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Year => format!("{:04}", date.year()),
        Granularity::Month => format!("{:04}-{:02}", date.year(), date.month()),
        Granularity::Week => format!("{:04}-W{:02}", date.year(), sunday_week(date)),
    }
}

/// Groups `records` by period and sums them, ascending by key. Records whose
/// date does not parse are left out.
pub fn aggregate_records(records: &[Transaction], granularity: Granularity) -> Vec<PeriodTotal> {
    let mut buckets: BTreeMap<String, PeriodTotal> = BTreeMap::new();
    for tx in records {
        let Some(date) = tx.parsed_date() else {
            debug!(id = tx.id, date = %tx.date, "skipping record with unparsable date");
            continue;
        };
        let key = period_key(date, granularity);
        let entry = buckets
            .entry(key.clone())
            .or_insert_with(|| PeriodTotal::empty(key));
        entry.count += 1;
        match tx.kind {
            Kind::Inflow => entry.inflow += tx.amount,
            Kind::Outflow => entry.outflow += tx.amount,
            Kind::Unknown(_) => {}
        }
    }
    buckets
        .into_values()
        .map(|mut p| {
            p.total = p.inflow - p.outflow;
            p
        })
        .collect()
}

pub fn aggregate(conn: &Connection, granularity: Granularity) -> Result<Vec<PeriodTotal>> {
    let records = store::get_all(conn)?;
    let totals = aggregate_records(&records, granularity);
    debug!(%granularity, records = records.len(), buckets = totals.len(), "aggregated ledger");
    Ok(totals)
}

pub fn weekly_totals(conn: &Connection) -> Result<Vec<PeriodTotal>> {
    aggregate(conn, Granularity::Week)
}

pub fn monthly_totals(conn: &Connection) -> Result<Vec<PeriodTotal>> {
    aggregate(conn, Granularity::Month)
}

pub fn yearly_totals(conn: &Connection) -> Result<Vec<PeriodTotal>> {
    aggregate(conn, Granularity::Year)
}
