// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Kind, NewTransaction, Transaction};
use crate::router::{self, SearchMode};
use crate::store;
use crate::utils::{maybe_print_json, parse_amount, parse_date, pretty_table, validate_name};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("update", sub)) => update(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("search", sub)) => search(conn, sub)?,
        Some(("find", sub)) => find(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_kind(raw: &str) -> Result<Kind> {
    Ok(raw.parse::<Kind>()?)
}

/// Validates the form fields the way the entry screen does before a write.
pub fn new_transaction_from(sub: &clap::ArgMatches) -> Result<NewTransaction> {
    let amount = parse_amount(sub.get_one::<String>("amount").context("amount missing")?)?;
    let name = validate_name(sub.get_one::<String>("name").context("name missing")?)?;
    let kind = parse_kind(sub.get_one::<String>("kind").context("kind missing")?)?;
    let date = parse_date(sub.get_one::<String>("date").context("date missing")?)?;
    Ok(NewTransaction::new(amount, name, kind, date.to_string()))
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let tx = new_transaction_from(sub)?;
    let id = store::insert(conn, &tx)?;
    println!(
        "Recorded #{} {} {} on {} ('{}')",
        id, tx.kind, tx.amount, tx.date, tx.name
    );
    Ok(())
}

fn update(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("id missing")?;
    let mut fields = store::require(conn, id)?.fields();
    if let Some(raw) = sub.get_one::<String>("amount") {
        fields.amount = parse_amount(raw)?;
    }
    if let Some(raw) = sub.get_one::<String>("name") {
        fields.name = validate_name(raw)?;
    }
    if let Some(raw) = sub.get_one::<String>("kind") {
        fields.kind = parse_kind(raw)?;
    }
    if let Some(raw) = sub.get_one::<String>("date") {
        fields.date = parse_date(raw)?.to_string();
    }
    store::update(conn, id, &fields)?;
    println!("Updated #{}", id);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("id missing")?;
    if store::delete(conn, id)? {
        println!("Removed #{}", id);
    } else {
        eprintln!("Transaction {} not found, nothing removed", id);
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("id missing")?;
    let tx = store::require(conn, id)?;
    print_rows(sub, &[tx])
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = store::get_all(conn)?;
    print_rows(sub, &data)
}

fn search(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let raw = sub.get_one::<String>("date").context("date missing")?;
    let mode = sub.get_one::<SearchMode>("mode").copied().unwrap_or_default();
    let data = router::search(conn, raw, mode)?;
    print_rows(sub, &data)
}

fn find(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let needle = sub.get_one::<String>("name").context("name missing")?;
    let data = store::search_by_name(conn, needle)?;
    print_rows(sub, &data)
}

fn print_rows(sub: &clap::ArgMatches, data: &[Transaction]) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No transactions found");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                t.date.clone(),
                t.name.clone(),
                t.kind.to_string(),
                format!("{:.2}", t.amount),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Date", "Name", "Kind", "Amount"], rows)
    );
    Ok(())
}
