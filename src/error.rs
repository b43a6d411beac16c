// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the ledger library.
///
/// Absence of a record is reported as `NotFound`, never folded into an
/// empty result, so callers can tell "no data" apart from a storage fault.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Cannot open ledger database at {}: {source}", path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("Storage operation failed: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("Transaction {0} not found")]
    NotFound(i64),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
