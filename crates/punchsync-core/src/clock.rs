use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// Fixed UTC offset of the upstream attendance system in minutes (+05:30).
pub const DEFAULT_UTC_OFFSET_MINUTES: i64 = 330;

/// Current wall-clock time in the upstream system's civil calendar.
///
/// Always derived from true UTC shifted by `offset_minutes` — the host's
/// configured timezone never enters the computation, so sync windows are
/// correct no matter where the daemon runs.
pub fn local_now(offset_minutes: i64) -> NaiveDateTime {
    to_upstream_local(Utc::now(), offset_minutes)
}

/// Shift a UTC instant into the upstream's local civil time.
pub fn to_upstream_local(utc: DateTime<Utc>, offset_minutes: i64) -> NaiveDateTime {
    utc.naive_utc() + Duration::minutes(offset_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn shifts_utc_by_fixed_offset() {
        let utc = Utc.with_ymd_and_hms(2024, 3, 9, 18, 30, 0).unwrap();
        let local = to_upstream_local(utc, DEFAULT_UTC_OFFSET_MINUTES);
        assert_eq!(local.to_string(), "2024-03-10 00:00:00");
    }

    #[test]
    fn offset_crosses_date_boundary_backwards() {
        let utc = Utc.with_ymd_and_hms(2024, 1, 1, 1, 0, 0).unwrap();
        let local = to_upstream_local(utc, -120);
        assert_eq!(local.to_string(), "2023-12-31 23:00:00");
    }

    #[test]
    fn zero_offset_is_identity() {
        let utc = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(to_upstream_local(utc, 0), utc.naive_utc());
    }
}
