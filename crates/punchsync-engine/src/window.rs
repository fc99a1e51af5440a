use chrono::{Duration, NaiveDateTime};

use punchsync_core::config::SyncConfig;

/// Layout of window bounds in the upstream query string.
const QUERY_FORMAT: &str = "%d/%m/%Y_%H:%M";

/// Windowing knobs, lifted out of [`SyncConfig`] so the calculator stays a
/// pure function of its arguments.
#[derive(Debug, Clone, Copy)]
pub struct WindowPolicy {
    pub default_backfill_days: u32,
    pub lookback_minutes: i64,
}

impl From<&SyncConfig> for WindowPolicy {
    fn from(sync: &SyncConfig) -> Self {
        Self {
            default_backfill_days: sync.default_backfill_days,
            lookback_minutes: sync.lookback_minutes,
        }
    }
}

/// A `[from, to]` interval in the upstream's local civil time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncWindow {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl SyncWindow {
    pub fn format_from(&self) -> String {
        self.from.format(QUERY_FORMAT).to_string()
    }

    pub fn format_to(&self) -> String {
        self.to.format(QUERY_FORMAT).to_string()
    }
}

/// Pick the next window to request.
///
/// Priority order:
/// 1. A positive `force_backfill_days` ignores the cursor entirely —
///    manual re-backfill.
/// 2. No cursor yet: bootstrap with the default backfill depth.
/// 3. Incremental: start the look-back below the cursor, so a punch that
///    became visible upstream after the previous fetch is re-requested.
///
/// `now` must already be in the upstream's civil time
/// ([`punchsync_core::clock::local_now`]); this function does no timezone
/// arithmetic of its own.
pub fn compute_window(
    last_punch: Option<NaiveDateTime>,
    now: NaiveDateTime,
    force_backfill_days: Option<u32>,
    policy: &WindowPolicy,
) -> SyncWindow {
    if let Some(days) = force_backfill_days.filter(|d| *d > 0) {
        return SyncWindow {
            from: now - Duration::days(days as i64),
            to: now,
        };
    }

    match last_punch {
        None => SyncWindow {
            from: now - Duration::days(policy.default_backfill_days as i64),
            to: now,
        },
        Some(cursor) => SyncWindow {
            from: cursor - Duration::minutes(policy.lookback_minutes),
            to: now,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const POLICY: WindowPolicy = WindowPolicy {
        default_backfill_days: 7,
        lookback_minutes: 5,
    };

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn bootstrap_uses_default_backfill() {
        let now = ts(2024, 3, 10, 0, 0);
        let window = compute_window(None, now, None, &POLICY);
        assert_eq!(window.from, ts(2024, 3, 3, 0, 0));
        assert_eq!(window.to, now);
    }

    #[test]
    fn incremental_overlaps_below_cursor() {
        let cursor = ts(2024, 3, 9, 18, 30);
        let now = ts(2024, 3, 10, 0, 0);
        let window = compute_window(Some(cursor), now, None, &POLICY);
        // Anything at or after the cursor is re-requested.
        assert_eq!(window.from, ts(2024, 3, 9, 18, 25));
        assert!(window.from <= cursor - Duration::minutes(5));
        assert_eq!(window.to, now);
    }

    #[test]
    fn force_backfill_ignores_cursor() {
        let cursor = ts(2024, 3, 9, 18, 30);
        let now = ts(2024, 3, 10, 0, 0);
        let window = compute_window(Some(cursor), now, Some(2), &POLICY);
        assert_eq!(window.from, ts(2024, 3, 8, 0, 0));
        assert_eq!(window.to, now);
    }

    #[test]
    fn zero_force_backfill_falls_through_to_incremental() {
        let cursor = ts(2024, 3, 9, 18, 30);
        let now = ts(2024, 3, 10, 0, 0);
        let window = compute_window(Some(cursor), now, Some(0), &POLICY);
        assert_eq!(window.from, ts(2024, 3, 9, 18, 25));
    }

    #[test]
    fn query_formatting() {
        let window = SyncWindow {
            from: ts(2024, 3, 3, 0, 0),
            to: ts(2024, 3, 10, 23, 59),
        };
        assert_eq!(window.format_from(), "03/03/2024_00:00");
        assert_eq!(window.format_to(), "10/03/2024_23:59");
    }

    #[test]
    fn wider_lookback_is_honored() {
        let policy = WindowPolicy {
            default_backfill_days: 7,
            lookback_minutes: 30,
        };
        let cursor = ts(2024, 3, 9, 18, 30);
        let window = compute_window(Some(cursor), ts(2024, 3, 10, 0, 0), None, &policy);
        assert_eq!(window.from, ts(2024, 3, 9, 18, 0));
    }
}
