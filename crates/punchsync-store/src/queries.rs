use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension};

use punchsync_core::config::ALL_EMPLOYEES;
use punchsync_core::normalize::STORAGE_FORMAT;

use crate::error::{Result, StoreError};

/// The sync cursor: newest persisted punch time within the employee scope.
///
/// `scope` of `"ALL"` (or empty) means the whole table; anything else
/// restricts to that employee code. Reads durable state directly — callers
/// must not cache the result across sync runs.
pub fn last_punch_time(conn: &Connection, scope: &str) -> Result<Option<NaiveDateTime>> {
    let raw: Option<String> = if scope.is_empty() || scope.eq_ignore_ascii_case(ALL_EMPLOYEES) {
        conn.query_row("SELECT MAX(punch_time) FROM punch_data", [], |r| r.get(0))
            .optional()?
            .flatten()
    } else {
        conn.query_row(
            "SELECT MAX(punch_time) FROM punch_data WHERE emp_code = ?1",
            [scope],
            |r| r.get(0),
        )
        .optional()?
        .flatten()
    };

    raw.map(|s| {
        NaiveDateTime::parse_from_str(&s, STORAGE_FORMAT)
            .map_err(|_| StoreError::CorruptTimestamp { raw: s })
    })
    .transpose()
}

/// Row counts surfaced by the `status` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreCounts {
    pub employees: u64,
    pub punches: u64,
}

pub fn counts(conn: &Connection) -> Result<StoreCounts> {
    let employees: u64 = conn.query_row("SELECT COUNT(*) FROM employees", [], |r| r.get(0))?;
    let punches: u64 = conn.query_row("SELECT COUNT(*) FROM punch_data", [], |r| r.get(0))?;
    Ok(StoreCounts { employees, punches })
}
