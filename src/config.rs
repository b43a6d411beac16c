// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::error::{LedgerError, Result};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.cashbook", "Cashbook", "cashbook"));

/// Environment variable overriding the database location.
pub const DB_ENV: &str = "CASHBOOK_DB";
pub const DB_FILE: &str = "cashbook.sqlite";
pub const DEFAULT_CURRENCY: &str = "R$";

pub fn default_db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or_else(|| {
        LedgerError::InvalidInput("Could not determine platform-specific data dir".into())
    })?;
    Ok(proj.data_dir().join(DB_FILE))
}

/// Picks the database location: explicit flag, then `CASHBOOK_DB`, then the
/// platform data dir.
pub fn db_path(explicit: Option<&Path>) -> Result<PathBuf> {
    resolve_db_path(explicit, std::env::var_os(DB_ENV))
}

pub fn resolve_db_path(explicit: Option<&Path>, env: Option<OsString>) -> Result<PathBuf> {
    if let Some(p) = explicit {
        return Ok(p.to_path_buf());
    }
    if let Some(v) = env.filter(|v| !v.is_empty()) {
        debug!(var = DB_ENV, "database path taken from environment");
        return Ok(PathBuf::from(v));
    }
    default_db_path()
}

pub(crate) fn create_settings_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
    "#,
    )?;
    Ok(())
}

/// Currency symbol printed next to report amounts.
pub fn get_currency(conn: &Connection) -> Result<String> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='currency'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()))
}

pub fn set_currency(conn: &Connection, symbol: &str) -> Result<()> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(LedgerError::InvalidInput("Currency symbol cannot be empty".into()));
    }
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('currency', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![symbol],
    )?;
    Ok(())
}
