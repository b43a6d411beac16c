// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cashbook::db;
use cashbook::error::LedgerError;
use cashbook::models::{Kind, NewTransaction};
use cashbook::store;
use rusqlite::Connection;
use rust_decimal::Decimal;
use tempfile::tempdir;

fn setup() -> Connection {
    db::open_in_memory().unwrap()
}

fn new_tx(amount: i64, name: &str, kind: Kind, date: &str) -> NewTransaction {
    NewTransaction::new(Decimal::from(amount), name, kind, date)
}

#[test]
fn insert_then_get_round_trips() {
    let conn = setup();
    let tx = NewTransaction::new(Decimal::new(1999, 2), "Padaria", Kind::Outflow, "2024-05-03");
    let id = store::insert(&conn, &tx).unwrap();
    let got = store::get(&conn, id).unwrap().unwrap();
    assert_eq!(got.id, id);
    assert_eq!(got.fields(), tx);
}

#[test]
fn get_all_returns_every_insert_minus_deletions() {
    let conn = setup();
    let mut ids = Vec::new();
    for (i, date) in ["2024-01-02", "2024-01-03", "2024-02-04", "2024-03-05"]
        .iter()
        .enumerate()
    {
        ids.push(store::insert(&conn, &new_tx(10 + i as i64, "Item", Kind::Inflow, date)).unwrap());
    }
    assert!(store::delete(&conn, ids[1]).unwrap());
    let all = store::get_all(&conn).unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.iter().all(|t| t.id != ids[1]));
    assert_eq!(store::count(&conn).unwrap(), 3);
}

#[test]
fn empty_store_reads_are_empty_not_errors() {
    let conn = setup();
    assert!(store::get_all(&conn).unwrap().is_empty());
    assert!(store::get(&conn, 1).unwrap().is_none());
    assert_eq!(store::net_total(&conn).unwrap(), Decimal::ZERO);
}

#[test]
fn second_delete_is_a_no_op() {
    let conn = setup();
    let id = store::insert(&conn, &new_tx(5, "Cafe", Kind::Outflow, "2024-01-09")).unwrap();
    store::insert(&conn, &new_tx(7, "Pao", Kind::Outflow, "2024-01-09")).unwrap();
    assert!(store::delete(&conn, id).unwrap());
    assert!(!store::delete(&conn, id).unwrap());
    assert_eq!(store::get_all(&conn).unwrap().len(), 1);
}

#[test]
fn ids_are_not_reused_after_delete() {
    let conn = setup();
    let a = store::insert(&conn, &new_tx(1, "A", Kind::Inflow, "2024-01-09")).unwrap();
    store::delete(&conn, a).unwrap();
    let b = store::insert(&conn, &new_tx(1, "B", Kind::Inflow, "2024-01-09")).unwrap();
    assert!(b > a);
}

#[test]
fn update_replaces_fields_and_reports_missing_ids() {
    let conn = setup();
    let id = store::insert(&conn, &new_tx(5, "Cafe", Kind::Outflow, "2024-01-09")).unwrap();
    let changed = new_tx(8, "Salario", Kind::Inflow, "2024-02-10");
    store::update(&conn, id, &changed).unwrap();
    assert_eq!(store::require(&conn, id).unwrap().fields(), changed);

    let err = store::update(&conn, id + 100, &changed).unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(n) if n == id + 100));
    assert!(matches!(
        store::require(&conn, id + 100),
        Err(LedgerError::NotFound(_))
    ));
}

#[test]
fn date_scoped_reads() {
    let conn = setup();
    for date in ["2024-01-01", "2024-03-01", "2024-03-15", "2024-03-15", "2023-03-15", "garbage"] {
        store::insert(&conn, &new_tx(1, "X", Kind::Inflow, date)).unwrap();
    }
    assert_eq!(store::get_by_year(&conn, 2024).unwrap().len(), 4);
    assert_eq!(store::get_by_month(&conn, 2024, 3).unwrap().len(), 3);
    assert_eq!(store::get_by_exact_date(&conn, "2024-03-15").unwrap().len(), 2);
    assert_eq!(store::get_by_exact_date(&conn, "garbage").unwrap().len(), 1);
    assert_eq!(store::get_all(&conn).unwrap().len(), 6);
    assert!(matches!(
        store::get_by_month(&conn, 2024, 13),
        Err(LedgerError::InvalidInput(_))
    ));
}

#[test]
fn unknown_kinds_are_stored_verbatim() {
    let conn = setup();
    let id = store::insert(
        &conn,
        &new_tx(30, "Move", Kind::from_label("Transfer"), "2024-04-04"),
    )
    .unwrap();
    let got = store::require(&conn, id).unwrap();
    assert_eq!(got.kind, Kind::Unknown("Transfer".into()));
    assert_eq!(store::get_by_month(&conn, 2024, 4).unwrap().len(), 1);
}

#[test]
fn legacy_labels_and_nulls_are_read() {
    let conn = setup();
    conn.execute_batch(
        r#"
        INSERT INTO transactions(amount, name, kind, date) VALUES (5000, 'Entrada', 'entrada', '2024-01-01');
        INSERT INTO transactions(amount, name, kind, date) VALUES (2000, 'Saida', 'SAIDA', '2024-03-01');
        INSERT INTO transactions(amount, name, kind, date) VALUES (NULL, NULL, NULL, NULL);
        "#,
    )
    .unwrap();
    let all = store::get_all(&conn).unwrap();
    assert_eq!(all[0].kind, Kind::Inflow);
    assert_eq!(all[1].kind, Kind::Outflow);
    assert_eq!(all[2].amount, Decimal::ZERO);
    assert!(all[2].parsed_date().is_none());
    assert_eq!(store::net_total(&conn).unwrap(), Decimal::from(3000));
}

#[test]
fn search_by_name_is_case_insensitive() {
    let conn = setup();
    store::insert(&conn, &new_tx(1, "Mercado Central", Kind::Outflow, "2024-01-02")).unwrap();
    store::insert(&conn, &new_tx(1, "Farmacia", Kind::Outflow, "2024-01-02")).unwrap();
    let hits = store::search_by_name(&conn, "mercado").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Mercado Central");
}

#[test]
fn create_table_is_idempotent() {
    let conn = setup();
    store::insert(&conn, &new_tx(1, "Keep", Kind::Inflow, "2024-01-02")).unwrap();
    store::create_table(&conn).unwrap();
    assert_eq!(store::get_all(&conn).unwrap().len(), 1);
}

#[test]
fn file_backed_store_persists_across_connections() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("ledger.sqlite");
    {
        let conn = db::open_at(&path).unwrap();
        store::insert(&conn, &new_tx(42, "Bonus", Kind::Inflow, "2024-06-30")).unwrap();
        db::close(conn).unwrap();
    }
    let conn = db::open_at(&path).unwrap();
    let all = store::get_all(&conn).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].amount, Decimal::from(42));
}

#[test]
fn period_reads_skip_non_canonical_dates() {
    let conn = setup();
    for date in ["2024-02-30", "2024-03-15T10:00", "2024-03-15 garbage", "2024-3-5"] {
        store::insert(&conn, &new_tx(1, "Odd", Kind::Inflow, date)).unwrap();
    }
    assert!(store::get_by_month(&conn, 2024, 2).unwrap().is_empty());
    assert!(store::get_by_month(&conn, 2024, 3).unwrap().is_empty());
    assert!(store::get_by_year(&conn, 2024).unwrap().is_empty());
    assert!(
        cashbook::router::search(&conn, "2024-03-01", cashbook::router::SearchMode::Auto)
            .unwrap()
            .is_empty()
    );
    assert!(cashbook::aggregate::yearly_totals(&conn).unwrap().is_empty());
    // Still visible to full-table and exact-text reads
    assert_eq!(store::get_all(&conn).unwrap().len(), 4);
    assert_eq!(store::get_by_exact_date(&conn, "2024-02-30").unwrap().len(), 1);

    store::insert(&conn, &new_tx(2, "Leap", Kind::Inflow, "2024-02-29")).unwrap();
    assert_eq!(store::get_by_month(&conn, 2024, 2).unwrap().len(), 1);
}

#[test]
fn infinite_amount_does_not_break_reads() {
    let conn = setup();
    store::insert(&conn, &new_tx(10, "Valid", Kind::Inflow, "2024-01-02")).unwrap();
    conn.execute(
        "INSERT INTO transactions(amount, name, kind, date) VALUES (9e999, 'Huge', 'inflow', '2024-01-03')",
        [],
    )
    .unwrap();

    let all = store::get_all(&conn).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].name, "Huge");
    assert_eq!(all[1].amount, Decimal::ZERO);
    assert_eq!(store::get_by_year(&conn, 2024).unwrap().len(), 2);
    assert_eq!(store::get_by_month(&conn, 2024, 1).unwrap().len(), 2);
    assert_eq!(
        cashbook::aggregate::yearly_totals(&conn).unwrap()[0].total,
        Decimal::from(10)
    );

    let bad = store::invalid_amounts(&conn).unwrap();
    assert_eq!(bad.len(), 1);
    assert_eq!(bad[0].0, all[1].id);
    assert!(bad[0].1.is_infinite());
}
