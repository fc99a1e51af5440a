use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use tracing::{info, warn};

use punchsync_core::config::SyncConfig;
use punchsync_core::normalize::normalize_punch_time;
use punchsync_core::{clock, NormalizedPunch, SyncReport};
use punchsync_store::{last_punch_time, persist_batch};
use punchsync_upstream::{PunchQuery, PunchSource};

use crate::error::{Result, SyncError};
use crate::window::{compute_window, SyncWindow, WindowPolicy};

/// Accepted layouts for explicit range bounds.
const BOUND_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];
const BOUND_DATE_FORMAT: &str = "%Y-%m-%d";

/// Orchestrates one sync attempt: cursor → window → fetch → normalize →
/// persist → report.
///
/// Stateless between invocations. The cursor is read from the database at
/// the start of every default-window run, so an overlapping manual trigger
/// can at worst inflate `skipped` — correctness rests on the storage
/// uniqueness key, not on exclusion here.
pub struct SyncEngine {
    source: Arc<dyn PunchSource>,
    db: Arc<Mutex<Connection>>,
    empcode: String,
    sync: SyncConfig,
}

impl SyncEngine {
    pub fn new(
        source: Arc<dyn PunchSource>,
        db: Arc<Mutex<Connection>>,
        empcode: String,
        sync: SyncConfig,
    ) -> Self {
        Self {
            source,
            db,
            empcode,
            sync,
        }
    }

    /// Incremental sync over the computed window. `force_backfill_days`
    /// bypasses the cursor for a manual re-backfill.
    ///
    /// Failures propagate to the caller; there is no retry here — the
    /// scheduler's next tick re-covers the window via the look-back.
    pub async fn sync_default_window(&self, force_backfill_days: Option<u32>) -> Result<SyncReport> {
        let cursor = {
            let conn = self.db.lock().unwrap();
            last_punch_time(&conn, &self.empcode)?
        };

        let now = clock::local_now(self.sync.utc_offset_minutes);
        let window = compute_window(
            cursor,
            now,
            force_backfill_days,
            &WindowPolicy::from(&self.sync),
        );
        info!(
            from = %window.format_from(),
            to = %window.format_to(),
            cursor = ?cursor.map(|c| c.to_string()),
            forced = ?force_backfill_days,
            "starting windowed sync"
        );

        self.run_window(&window, &self.empcode).await
    }

    /// Sync an explicit caller-supplied range, bypassing the window
    /// calculator. Bounds are validated before any network or storage
    /// access: full timestamps or date-only strings (midnight for `from`,
    /// 23:59 for `to`).
    pub async fn sync_range(
        &self,
        from: &str,
        to: &str,
        emp_code: Option<&str>,
    ) -> Result<SyncReport> {
        let from_ts = parse_range_bound(from, Bound::Start)?;
        let to_ts = parse_range_bound(to, Bound::End)?;
        if from_ts > to_ts {
            return Err(SyncError::Validation(format!(
                "range start {from:?} is after range end {to:?}"
            )));
        }

        let window = SyncWindow {
            from: from_ts,
            to: to_ts,
        };
        let emp_code = emp_code.unwrap_or(&self.empcode);
        info!(
            from = %window.format_from(),
            to = %window.format_to(),
            empcode = %emp_code,
            "starting explicit-range sync"
        );

        self.run_window(&window, emp_code).await
    }

    /// The shared fetch → normalize → persist → report tail.
    async fn run_window(&self, window: &SyncWindow, emp_code: &str) -> Result<SyncReport> {
        let query = PunchQuery {
            emp_code: emp_code.to_string(),
            from: window.format_from(),
            to: window.format_to(),
        };

        let raw = self.source.fetch(&query).await?;
        let fetched = raw.len() as u64;

        let mut failed = 0u64;
        let mut batch: Vec<NormalizedPunch> = Vec::with_capacity(raw.len());
        for record in raw {
            match normalize_punch_time(&record.punch_time) {
                Ok(punch_time) => batch.push(NormalizedPunch {
                    emp_code: record.emp_code,
                    name: record.name,
                    punch_time,
                    flag: record.flag,
                }),
                Err(e) => {
                    warn!(error = %e, payload = %record.source, "dropping malformed punch record");
                    failed += 1;
                }
            }
        }

        let stats = {
            let mut conn = self.db.lock().unwrap();
            persist_batch(&mut conn, &batch)?
        };

        let report = SyncReport {
            fetched,
            inserted: stats.inserted,
            skipped: stats.skipped,
            failed: failed + stats.failed,
            window_from: query.from,
            window_to: query.to,
        };
        info!(%report, source = %self.source.name(), "sync complete");
        Ok(report)
    }
}

/// Which end of the range a bound belongs to — decides how a date-only
/// string expands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Start,
    End,
}

fn parse_range_bound(raw: &str, bound: Bound) -> Result<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SyncError::Validation("range bound is empty".into()));
    }

    for format in BOUND_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(ts);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, BOUND_DATE_FORMAT) {
        let expanded = match bound {
            Bound::Start => date.and_hms_opt(0, 0, 0),
            Bound::End => date.and_hms_opt(23, 59, 0),
        };
        if let Some(ts) = expanded {
            return Ok(ts);
        }
    }

    Err(SyncError::Validation(format!(
        "unparsable range bound {raw:?} (expected YYYY-MM-DD or YYYY-MM-DD HH:MM[:SS])"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_timestamp_bounds() {
        let ts = parse_range_bound("2024-03-05 09:15:30", Bound::Start).unwrap();
        assert_eq!(ts.to_string(), "2024-03-05 09:15:30");
        let ts = parse_range_bound("2024-03-05 09:15", Bound::End).unwrap();
        assert_eq!(ts.to_string(), "2024-03-05 09:15:00");
    }

    #[test]
    fn date_only_expands_per_bound() {
        let from = parse_range_bound("2024-03-05", Bound::Start).unwrap();
        assert_eq!(from.to_string(), "2024-03-05 00:00:00");
        let to = parse_range_bound("2024-03-05", Bound::End).unwrap();
        assert_eq!(to.to_string(), "2024-03-05 23:59:00");
    }

    #[test]
    fn rejects_empty_and_garbage() {
        assert!(parse_range_bound("", Bound::Start).is_err());
        assert!(parse_range_bound("  ", Bound::Start).is_err());
        assert!(parse_range_bound("last tuesday", Bound::End).is_err());
        assert!(parse_range_bound("05/03/2024", Bound::Start).is_err());
    }
}
