use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::clock::DEFAULT_UTC_OFFSET_MINUTES;

/// Upstream request timeout — the fetch is a single blocking call and the
/// attendance API is slow on large windows.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
/// Bootstrap / first-run backfill depth in days.
pub const DEFAULT_BACKFILL_DAYS: u32 = 7;
/// Incremental look-back applied below the last persisted punch, in minutes.
/// Absorbs upstream commit lag; duplicates it creates are deduplicated by
/// the storage uniqueness key.
pub const DEFAULT_LOOKBACK_MINUTES: i64 = 5;
/// Scheduled sync cadence in seconds.
pub const DEFAULT_INTERVAL_SECS: u64 = 600;
/// Employee filter value the upstream treats as "every employee".
pub const ALL_EMPLOYEES: &str = "ALL";

/// Top-level config (punchsync.toml + PUNCHSYNC_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchsyncConfig {
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

/// Connection details for the upstream time-and-attendance API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Full URL of the punch listing endpoint.
    pub base_url: String,
    /// Basic auth credentials.
    pub username: String,
    pub password: String,
    /// Employee code filter sent as `Empcode`; "ALL" covers every employee.
    #[serde(default = "default_empcode")]
    pub empcode: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Windowing and cadence knobs. Every field has a safe default; the
/// look-back and UTC offset are configurable because deployments differ in
/// upstream commit latency and, rarely, in the device fleet's timezone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_backfill_days")]
    pub default_backfill_days: u32,
    #[serde(default = "default_lookback_minutes")]
    pub lookback_minutes: i64,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Offset applied to true UTC to obtain the upstream's civil time.
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            default_backfill_days: DEFAULT_BACKFILL_DAYS,
            lookback_minutes: DEFAULT_LOOKBACK_MINUTES,
            interval_secs: DEFAULT_INTERVAL_SECS,
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
        }
    }
}

fn default_empcode() -> String {
    ALL_EMPLOYEES.to_string()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_backfill_days() -> u32 {
    DEFAULT_BACKFILL_DAYS
}
fn default_lookback_minutes() -> i64 {
    DEFAULT_LOOKBACK_MINUTES
}
fn default_interval_secs() -> u64 {
    DEFAULT_INTERVAL_SECS
}
fn default_utc_offset_minutes() -> i64 {
    DEFAULT_UTC_OFFSET_MINUTES
}
fn default_db_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.punchsync/punchsync.db", home)
}

impl PunchsyncConfig {
    /// Load config from a TOML file with PUNCHSYNC_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. PUNCHSYNC_CONFIG env var
    ///   3. ~/.punchsync/punchsync.toml
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: PunchsyncConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("PUNCHSYNC_").split("_"))
            .extract()
            .map_err(|e| crate::error::CoreError::Config(e.to_string()))?;

        if config.sync.default_backfill_days == 0 {
            return Err(crate::error::CoreError::Config(
                "sync.default_backfill_days must be at least 1".into(),
            ));
        }
        if config.sync.lookback_minutes < 0 {
            return Err(crate::error::CoreError::Config(
                "sync.lookback_minutes must not be negative".into(),
            ));
        }

        Ok(config)
    }
}

pub fn default_config_path() -> String {
    let env_path = std::env::var("PUNCHSYNC_CONFIG").ok();
    env_path.unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        format!("{}/.punchsync/punchsync.toml", home)
    })
}

/// Commented starter config written by `punchsync init-config`.
pub const CONFIG_TEMPLATE: &str = r#"# punchsync configuration

[upstream]
# Punch listing endpoint of the attendance API.
base_url = "http://attendance.example.com/api/punchdata"
username = "api-user"
password = "change-me"
# Employee code filter; "ALL" pulls every employee.
empcode = "ALL"
# Request timeout in seconds.
timeout_secs = 60

[database]
# SQLite database file. Parent directory is created on startup.
#path = "~/.punchsync/punchsync.db"

[sync]
# First-run backfill depth in days.
default_backfill_days = 7
# Overlap below the last persisted punch on incremental runs, in minutes.
lookback_minutes = 5
# Scheduled sync cadence in seconds.
interval_secs = 600
# Offset from UTC to the upstream's civil time (+05:30 = 330).
utc_offset_minutes = 330
"#;
