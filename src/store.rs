// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Durable CRUD over ledger transactions.
//!
//! Every function takes the connection explicitly; nothing here holds
//! global state. Failures are logged where they happen and then returned.

use rusqlite::{Connection, Params, Row, params};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, error, info, warn};

use crate::error::{LedgerError, Result};
use crate::models::{Kind, NewTransaction, Transaction};

const COLUMNS: &str = "id, amount, name, kind, date";

/// Creates the `transactions` table if it is missing. Safe to call repeatedly.
///
/// `AUTOINCREMENT` keeps SQLite from handing out the id of a deleted row again.
pub fn create_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        amount FLOAT,
        name VARCHAR(300),
        kind VARCHAR(100),
        date VARCHAR(12)
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
    "#,
    )
    .inspect_err(|e| error!(error = %e, "failed to create transactions table"))?;
    debug!("transactions table ready");
    Ok(())
}

/// Appends a record and returns the id the store assigned to it.
///
/// No validation happens here: unknown kinds, negative amounts and malformed
/// dates are stored exactly as given.
pub fn insert(conn: &Connection, tx: &NewTransaction) -> Result<i64> {
    let amount = amount_to_sql(tx.amount)?;
    conn.execute(
        "INSERT INTO transactions(amount, name, kind, date) VALUES (?1, ?2, ?3, ?4)",
        params![amount, tx.name, tx.kind.label(), tx.date],
    )
    .inspect_err(|e| warn!(error = %e, "insert failed"))?;
    let id = conn.last_insert_rowid();
    info!(id, kind = %tx.kind, date = %tx.date, "inserted transaction");
    Ok(id)
}

/// Replaces every mutable field of record `id`.
pub fn update(conn: &Connection, id: i64, tx: &NewTransaction) -> Result<()> {
    let amount = amount_to_sql(tx.amount)?;
    let changed = conn
        .execute(
            "UPDATE transactions SET name=?1, amount=?2, kind=?3, date=?4 WHERE id=?5",
            params![tx.name, amount, tx.kind.label(), tx.date, id],
        )
        .inspect_err(|e| warn!(id, error = %e, "update failed"))?;
    if changed == 0 {
        debug!(id, "update matched no row");
        return Err(LedgerError::NotFound(id));
    }
    info!(id, "updated transaction");
    Ok(())
}

/// Removes record `id`. Returns `false` when there was nothing to remove,
/// so deleting twice is harmless.
pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
    let removed = conn
        .execute("DELETE FROM transactions WHERE id=?1", params![id])
        .inspect_err(|e| warn!(id, error = %e, "delete failed"))?;
    if removed > 0 {
        info!(id, "deleted transaction");
    } else {
        debug!(id, "delete matched no row");
    }
    Ok(removed > 0)
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Transaction>> {
    let mut rows = select(conn, "WHERE id=?1", params![id])?;
    Ok(rows.pop())
}

/// Like [`get`], but absence is an error.
pub fn require(conn: &Connection, id: i64) -> Result<Transaction> {
    get(conn, id)?.ok_or(LedgerError::NotFound(id))
}

pub fn get_all(conn: &Connection) -> Result<Vec<Transaction>> {
    select(conn, "", [])
}

// SQLite's date functions roll `2024-02-30` over into March and ignore time
// suffixes; only rows whose text is already a canonical date may match.
const CANONICAL_DATE: &str = "date(date) IS date";

pub fn get_by_year(conn: &Connection, year: i32) -> Result<Vec<Transaction>> {
    select(
        conn,
        &format!("WHERE {} AND strftime('%Y', date)=?1", CANONICAL_DATE),
        params![format!("{:04}", year)],
    )
}

pub fn get_by_month(conn: &Connection, year: i32, month: u32) -> Result<Vec<Transaction>> {
    if !(1..=12).contains(&month) {
        return Err(LedgerError::InvalidInput(format!(
            "Month must be between 1 and 12, got {}",
            month
        )));
    }
    select(
        conn,
        &format!(
            "WHERE {} AND strftime('%Y', date)=?1 AND strftime('%m', date)=?2",
            CANONICAL_DATE
        ),
        params![format!("{:04}", year), format!("{:02}", month)],
    )
}

/// Exact text match on the stored date.
pub fn get_by_exact_date(conn: &Connection, date: &str) -> Result<Vec<Transaction>> {
    select(conn, "WHERE date=?1", params![date])
}

/// Case-insensitive substring match on the transaction name.
pub fn search_by_name(conn: &Connection, needle: &str) -> Result<Vec<Transaction>> {
    let needle = needle.trim().to_lowercase();
    let all = get_all(conn)?;
    Ok(all
        .into_iter()
        .filter(|t| t.name.to_lowercase().contains(&needle))
        .collect())
}

/// Signed sum over the whole ledger: inflows minus outflows.
pub fn net_total(conn: &Connection) -> Result<Decimal> {
    Ok(get_all(conn)?.iter().map(Transaction::signed_amount).sum())
}

/// Rows whose stored amount is not representable as a decimal (infinite or
/// too large). Reads return these with a zero amount.
pub fn invalid_amounts(conn: &Connection) -> Result<Vec<(i64, f64)>> {
    let mut stmt =
        conn.prepare("SELECT id, amount FROM transactions WHERE amount IS NOT NULL ORDER BY id")?;
    let rows = stmt.query_map([], |r| Ok((r.get::<_, i64>(0)?, r.get::<_, f64>(1)?)))?;
    let mut data = Vec::new();
    for row in rows {
        let (id, amount) = row?;
        if Decimal::try_from(amount).is_err() {
            data.push((id, amount));
        }
    }
    Ok(data)
}

pub fn count(conn: &Connection) -> Result<usize> {
    let n: i64 = conn.query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))?;
    Ok(n as usize)
}

fn select<P: Params>(conn: &Connection, filter: &str, params: P) -> Result<Vec<Transaction>> {
    let sql = format!("SELECT {} FROM transactions {} ORDER BY id", COLUMNS, filter);
    let mut stmt = conn
        .prepare(&sql)
        .inspect_err(|e| warn!(error = %e, "failed to prepare transaction query"))?;
    let rows = stmt.query_map(params, from_row)?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    debug!(filter, rows = data.len(), "loaded transactions");
    Ok(data)
}

// Legacy databases allow NULL in every column but the id. NULL and
// non-representable amounts read as zero so one bad row cannot hide the rest.
fn from_row(r: &Row<'_>) -> rusqlite::Result<Transaction> {
    let id: i64 = r.get(0)?;
    let amount: Option<f64> = r.get(1)?;
    let amount = match amount.map(Decimal::try_from) {
        Some(Ok(v)) => v,
        Some(Err(e)) => {
            warn!(id, amount = ?amount, error = %e, "amount is not a finite decimal, reading as zero");
            Decimal::ZERO
        }
        None => Decimal::ZERO,
    };
    let kind: Option<String> = r.get(3)?;
    Ok(Transaction {
        id,
        amount,
        name: r.get::<_, Option<String>>(2)?.unwrap_or_default(),
        kind: Kind::from_label(kind.as_deref().unwrap_or_default()),
        date: r.get::<_, Option<String>>(4)?.unwrap_or_default(),
    })
}

fn amount_to_sql(amount: Decimal) -> Result<f64> {
    amount
        .to_f64()
        .ok_or_else(|| LedgerError::InvalidInput(format!("Amount {} is out of range", amount)))
}
