// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{self, Granularity};
use crate::store;
use anyhow::{Context, Result, bail};
use rusqlite::Connection;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Csv,
    Json,
}

fn parse_format(sub: &clap::ArgMatches) -> Result<Format> {
    let fmt = sub
        .get_one::<String>("format")
        .context("format missing")?
        .trim()
        .to_lowercase();
    match fmt.as_str() {
        "csv" => Ok(Format::Csv),
        "json" => Ok(Format::Json),
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        Some(("totals", sub)) => export_totals(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    // Validate before touching the filesystem
    let fmt = parse_format(sub)?;
    let out = sub.get_one::<String>("out").context("out missing")?;
    let rows = store::get_all(conn)?;

    match fmt {
        Format::Csv => {
            let mut wtr = csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
            wtr.write_record(["id", "date", "name", "kind", "amount"])?;
            for t in &rows {
                wtr.write_record([
                    t.id.to_string(),
                    t.date.clone(),
                    t.name.clone(),
                    t.kind.to_string(),
                    t.amount.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        Format::Json => {
            let items: Vec<_> = rows
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id, "date": t.date, "name": t.name,
                        "kind": t.kind.label(), "amount": t.amount.to_string()
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Write {}", out))?;
        }
    }
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}

fn export_totals(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = parse_format(sub)?;
    let out = sub.get_one::<String>("out").context("out missing")?;
    let granularity = sub
        .get_one::<Granularity>("period")
        .copied()
        .unwrap_or(Granularity::Month);
    let data = aggregate::aggregate(conn, granularity)?;

    match fmt {
        Format::Csv => {
            let mut wtr = csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
            wtr.write_record([granularity.to_string().as_str(), "inflow", "outflow", "total", "count"])?;
            for p in &data {
                wtr.write_record([
                    p.key.clone(),
                    p.inflow.to_string(),
                    p.outflow.to_string(),
                    p.total.to_string(),
                    p.count.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        Format::Json => {
            std::fs::write(out, serde_json::to_string_pretty(&data)?)
                .with_context(|| format!("Write {}", out))?;
        }
    }
    println!("Exported {} {} totals to {}", data.len(), granularity, out);
    Ok(())
}
