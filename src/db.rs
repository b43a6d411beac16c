// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;
use std::path::Path;

use rusqlite::Connection;
use tracing::{debug, error};

use crate::error::{LedgerError, Result};
use crate::{config, store};

/// Opens (creating if needed) the ledger database at `path` and makes sure
/// the schema exists. The connection is released when dropped.
pub fn open_at(path: &Path) -> Result<Connection> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let conn = Connection::open(path).map_err(|source| {
        error!(path = %path.display(), error = %source, "failed to open ledger database");
        LedgerError::StorageUnavailable {
            path: path.to_path_buf(),
            source,
        }
    })?;
    debug!(path = %path.display(), "opened ledger database");
    init_schema(&conn)?;
    Ok(conn)
}

/// Private, throwaway ledger. Used by tests and dry runs.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().map_err(|source| LedgerError::StorageUnavailable {
        path: ":memory:".into(),
        source,
    })?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Closes the connection, surfacing any error SQLite reports on close.
pub fn close(conn: Connection) -> Result<()> {
    conn.close().map_err(|(_, e)| {
        error!(error = %e, "failed to close ledger database");
        LedgerError::Storage(e)
    })
}

fn init_schema(conn: &Connection) -> Result<()> {
    store::create_table(conn)?;
    config::create_settings_table(conn)?;
    Ok(())
}
