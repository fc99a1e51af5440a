use rusqlite::{Connection, Transaction};
use tracing::warn;

use punchsync_core::normalize::storage_string;
use punchsync_core::NormalizedPunch;

use crate::error::Result;

/// Counts produced by one persisted batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersistStats {
    /// New punch rows written.
    pub inserted: u64,
    /// Duplicates absorbed by the (emp_code, punch_time) key.
    pub skipped: u64,
    /// Records rejected before touching the tables (empty employee code).
    pub failed: u64,
}

/// Write a batch of normalized punches, idempotently.
///
/// The whole batch is one transaction: an infrastructure failure anywhere
/// rolls back every row, so a half-applied batch is never visible. Re-sent
/// records hit the uniqueness key and count as `skipped`, not errors.
pub fn persist_batch(conn: &mut Connection, batch: &[NormalizedPunch]) -> Result<PersistStats> {
    let tx = conn.transaction()?;
    let stats = apply_batch(&tx, batch)?;
    tx.commit()?;
    Ok(stats)
}

/// Apply a batch inside an open transaction. Committing is the caller's
/// decision, which is also what makes the all-or-nothing boundary testable.
fn apply_batch(tx: &Transaction<'_>, batch: &[NormalizedPunch]) -> Result<PersistStats> {
    let mut stats = PersistStats::default();
    let synced_at = chrono::Utc::now().to_rfc3339();

    for punch in batch {
        if punch.emp_code.trim().is_empty() {
            warn!(punch_time = %storage_string(&punch.punch_time), "dropping punch with empty employee code");
            stats.failed += 1;
            continue;
        }

        // Name is written once, on first sight of the code. Later punches
        // never update it, whatever name they carry.
        tx.execute(
            "INSERT INTO employees (emp_code, name) VALUES (?1, ?2)
             ON CONFLICT(emp_code) DO NOTHING",
            rusqlite::params![
                punch.emp_code,
                punch.name.as_deref().unwrap_or(&punch.emp_code)
            ],
        )?;

        let affected = tx.execute(
            "INSERT INTO punch_data (emp_code, punch_time, flag, synced_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(emp_code, punch_time) DO NOTHING",
            rusqlite::params![
                punch.emp_code,
                storage_string(&punch.punch_time),
                punch.flag,
                synced_at
            ],
        )?;

        if affected == 0 {
            stats.skipped += 1;
        } else {
            stats.inserted += 1;
        }
    }

    Ok(stats)
}
