use chrono::NaiveDateTime;

use crate::error::{CoreError, Result};

/// Timestamp layout the upstream API emits inside punch records.
const UPSTREAM_FORMAT: &str = "%d/%m/%Y %H:%M:%S";
/// Some device firmware drops the seconds component.
const UPSTREAM_FORMAT_NO_SECONDS: &str = "%d/%m/%Y %H:%M";
/// Canonical layout used for storage and comparison.
pub const STORAGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Convert an upstream `DD/MM/YYYY HH:mm:ss` wall-clock string into a naive
/// timestamp.
///
/// Pure format conversion — the input is already local civil time, so no
/// timezone arithmetic happens here. Out-of-range or non-numeric components
/// fail with a descriptive error instead of silently producing a bad date.
pub fn normalize_punch_time(raw: &str) -> Result<NaiveDateTime> {
    let trimmed = raw.trim();
    NaiveDateTime::parse_from_str(trimmed, UPSTREAM_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, UPSTREAM_FORMAT_NO_SECONDS))
        .map_err(|e| CoreError::Timestamp {
            raw: raw.to_string(),
            reason: e.to_string(),
        })
}

/// Render a naive timestamp in the canonical `YYYY-MM-DD HH:mm:ss` layout.
pub fn storage_string(ts: &NaiveDateTime) -> String {
    ts.format(STORAGE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let ts = normalize_punch_time("05/03/2024 09:15:30").unwrap();
        assert_eq!(storage_string(&ts), "2024-03-05 09:15:30");
    }

    #[test]
    fn tolerates_missing_seconds() {
        let ts = normalize_punch_time("05/03/2024 09:15").unwrap();
        assert_eq!(storage_string(&ts), "2024-03-05 09:15:00");
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let ts = normalize_punch_time("  31/12/2023 23:59:59 ").unwrap();
        assert_eq!(storage_string(&ts), "2023-12-31 23:59:59");
    }

    #[test]
    fn rejects_out_of_range_components() {
        assert!(normalize_punch_time("99/99/2024 09:15:30").is_err());
        assert!(normalize_punch_time("31/02/2024 08:00:00").is_err());
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert!(normalize_punch_time("yesterday").is_err());
        assert!(normalize_punch_time("").is_err());
    }

    #[test]
    fn rejects_iso_layout() {
        // Already-normalized input must not pass — the caller would be
        // feeding storage strings back through the normalizer.
        assert!(normalize_punch_time("2024-03-05 09:15:30").is_err());
    }
}
