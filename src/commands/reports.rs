// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{self, Granularity, PeriodTotal};
use crate::config::get_currency;
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("totals", sub)) => totals(conn, sub)?,
        Some(("summary", sub)) => summary(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn period_header(granularity: Granularity) -> &'static str {
    match granularity {
        Granularity::Week => "Week",
        Granularity::Month => "Month",
        Granularity::Year => "Year",
    }
}

fn totals(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let granularity = sub
        .get_one::<Granularity>("period")
        .copied()
        .unwrap_or(Granularity::Month);
    let data = aggregate::aggregate(conn, granularity)?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No transactions recorded");
        return Ok(());
    }
    let symbol = get_currency(conn)?;
    println!(
        "{}",
        pretty_table(
            &[period_header(granularity), "Inflow", "Outflow", "Total", "Count"],
            totals_rows(&data, &symbol),
        )
    );
    Ok(())
}

pub fn totals_rows(data: &[PeriodTotal], symbol: &str) -> Vec<Vec<String>> {
    data.iter()
        .map(|p| {
            vec![
                p.key.clone(),
                fmt_money(&p.inflow, symbol),
                fmt_money(&p.outflow, symbol),
                fmt_money(&p.total, symbol),
                p.count.to_string(),
            ]
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub net_total: Decimal,
    pub transactions: usize,
}

pub fn build_summary(conn: &Connection) -> Result<Summary> {
    Ok(Summary {
        net_total: store::net_total(conn)?,
        transactions: store::count(conn)?,
    })
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let s = build_summary(conn)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let symbol = get_currency(conn)?;
    println!(
        "{}",
        pretty_table(
            &["Net total", "Transactions"],
            vec![vec![fmt_money(&s.net_total, &symbol), s.transactions.to_string()]],
        )
    );
    Ok(())
}
