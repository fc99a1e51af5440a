use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A punch record as the upstream API delivered it, before normalization.
///
/// `source` keeps the untouched JSON object so a malformed record can be
/// logged in full for diagnostics. Never persisted in this form.
#[derive(Debug, Clone)]
pub struct RawPunch {
    /// Employee code — upstream's stable identifier.
    pub emp_code: String,
    /// Display name, if the upstream included one.
    pub name: Option<String>,
    /// Local wall-clock timestamp string, `DD/MM/YYYY HH:mm:ss`.
    pub punch_time: String,
    /// In/out (or device-specific) flag, passed through verbatim.
    pub flag: Option<String>,
    /// The full source payload for this record.
    pub source: serde_json::Value,
}

/// A punch record after timestamp normalization, ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPunch {
    pub emp_code: String,
    pub name: Option<String>,
    /// Local civil time with no attached zone.
    pub punch_time: NaiveDateTime,
    pub flag: Option<String>,
}

/// Outcome summary of one sync attempt.
///
/// `fetched` counts every record the upstream returned;
/// `fetched = inserted + skipped + failed` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Records returned by the upstream for the requested window.
    pub fetched: u64,
    /// New rows written to storage.
    pub inserted: u64,
    /// Duplicates absorbed by the (emp_code, punch_time) uniqueness key.
    pub skipped: u64,
    /// Records dropped before or during persistence (malformed timestamp,
    /// empty employee code).
    pub failed: u64,
    /// Requested window start, `DD/MM/YYYY_HH:mm`.
    pub window_from: String,
    /// Requested window end, `DD/MM/YYYY_HH:mm`.
    pub window_to: String,
}

impl std::fmt::Display for SyncReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "window [{} .. {}]: fetched {}, inserted {}, skipped {}, failed {}",
            self.window_from, self.window_to, self.fetched, self.inserted, self.skipped, self.failed
        )
    }
}
