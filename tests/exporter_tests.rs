// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cashbook::commands::exporter;
use cashbook::models::{Kind, NewTransaction};
use cashbook::{cli, db, store};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde_json::json;
use tempfile::tempdir;

fn seeded() -> Connection {
    let conn = db::open_in_memory().unwrap();
    store::insert(
        &conn,
        &NewTransaction::new(Decimal::from(100), "Salario", Kind::Inflow, "2024-01-01"),
    )
    .unwrap();
    store::insert(
        &conn,
        &NewTransaction::new(Decimal::new(4050, 2), "Mercado", Kind::Outflow, "2024-01-15"),
    )
    .unwrap();
    conn
}

fn run_export(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["cashbook", "export"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().try_get_matches_from(argv).unwrap();
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(conn, export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_transactions_as_json() {
    let conn = seeded();
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.json");
    let out_str = out.to_string_lossy().to_string();
    run_export(&conn, &["transactions", "--format", "json", "--out", &out_str]).unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], json!("Salario"));
    assert_eq!(items[0]["kind"], json!("inflow"));
    assert_eq!(items[1]["date"], json!("2024-01-15"));
    assert_eq!(items[1]["kind"], json!("outflow"));
    let amount: Decimal = items[1]["amount"].as_str().unwrap().parse().unwrap();
    assert_eq!(amount, Decimal::new(4050, 2));
}

#[test]
fn export_monthly_totals_as_csv() {
    let conn = seeded();
    let dir = tempdir().unwrap();
    let out = dir.path().join("totals.csv");
    let out_str = out.to_string_lossy().to_string();
    run_export(
        &conn,
        &["totals", "--period", "month", "--format", "CSV", "--out", &out_str],
    )
    .unwrap();

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(&headers[0], "month");
    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 1);
    assert_eq!(&records[0][0], "2024-01");
    assert_eq!(records[0][3].parse::<Decimal>().unwrap(), Decimal::new(595, 1));
    assert_eq!(&records[0][4], "2");
}

#[test]
fn export_rejects_unknown_format() {
    let conn = seeded();
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.xml");
    let out_str = out.to_string_lossy().to_string();
    assert!(run_export(&conn, &["transactions", "--format", "xml", "--out", &out_str]).is_err());
    assert!(!out.exists());
}
