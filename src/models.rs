// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Strict `YYYY-MM-DD`: exactly ten characters, zero-padded, no sign and no
/// time suffix. chrono alone also takes `2024-3-5` and `+2024-03-05`.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let b = raw.as_bytes();
    let shaped = b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b
            .iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// Direction of a transaction. Labels are matched case-insensitively; the
/// Portuguese `entrada`/`saida` labels written by older ledgers are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Kind {
    Inflow,
    Outflow,
    /// Any other label. Kept verbatim so a round trip through the store
    /// does not rewrite it; contributes nothing to period totals.
    Unknown(String),
}

impl Kind {
    /// Lenient resolution used when reading rows back from storage.
    pub fn from_label(raw: &str) -> Kind {
        match raw.trim().to_lowercase().as_str() {
            "inflow" | "entrada" | "income" => Kind::Inflow,
            "outflow" | "saida" | "saída" | "expense" => Kind::Outflow,
            _ => Kind::Unknown(raw.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Kind::Inflow => "inflow",
            Kind::Outflow => "outflow",
            Kind::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Kind::Unknown(_))
    }

    /// Signed contribution of `amount` to a running total.
    pub fn apply(&self, amount: Decimal) -> Decimal {
        match self {
            Kind::Inflow => amount,
            Kind::Outflow => -amount,
            Kind::Unknown(_) => Decimal::ZERO,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Strict parse: only recognized labels are accepted.
impl FromStr for Kind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Kind::from_label(s) {
            Kind::Unknown(raw) => Err(LedgerError::InvalidInput(format!(
                "Unknown transaction kind '{}' (use inflow|outflow)",
                raw
            ))),
            known => Ok(known),
        }
    }
}

impl From<String> for Kind {
    fn from(raw: String) -> Self {
        Kind::from_label(&raw)
    }
}

impl From<Kind> for String {
    fn from(kind: Kind) -> Self {
        kind.label().to_string()
    }
}

/// A stored ledger record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub amount: Decimal,
    pub name: String,
    pub kind: Kind,
    pub date: String, // YYYY-MM-DD as stored
}

impl Transaction {
    /// `None` when the stored text is not a valid `YYYY-MM-DD` date.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.date)
    }

    pub fn signed_amount(&self) -> Decimal {
        self.kind.apply(self.amount)
    }

    pub fn fields(&self) -> NewTransaction {
        NewTransaction {
            amount: self.amount,
            name: self.name.clone(),
            kind: self.kind.clone(),
            date: self.date.clone(),
        }
    }
}

/// The mutable fields of a record, used for both insert and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub name: String,
    pub kind: Kind,
    pub date: String,
}

impl NewTransaction {
    pub fn new(
        amount: Decimal,
        name: impl Into<String>,
        kind: Kind,
        date: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            name: name.into(),
            kind,
            date: date.into(),
        }
    }
}
