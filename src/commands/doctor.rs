// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Transaction;
use crate::store;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

/// Rows the aggregator will skip or mis-sign, as `[issue, id, detail]`.
pub fn find_issues(records: &[Transaction]) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for t in records {
        if t.parsed_date().is_none() {
            rows.push(vec!["unparsable_date".into(), t.id.to_string(), t.date.clone()]);
        }
        if t.amount.is_sign_negative() && !t.amount.is_zero() {
            rows.push(vec!["negative_amount".into(), t.id.to_string(), t.amount.to_string()]);
        }
        if !t.kind.is_known() {
            rows.push(vec!["unknown_kind".into(), t.id.to_string(), t.kind.to_string()]);
        }
    }
    rows
}

/// Every issue in the ledger, including amounts that read back as zero
/// because the stored value is not a finite decimal.
pub fn collect_issues(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = find_issues(&store::get_all(conn)?);
    for (id, amount) in store::invalid_amounts(conn)? {
        rows.push(vec!["invalid_amount".into(), id.to_string(), amount.to_string()]);
    }
    Ok(rows)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = collect_issues(conn)?;
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "ID", "Detail"], rows));
    }
    Ok(())
}
