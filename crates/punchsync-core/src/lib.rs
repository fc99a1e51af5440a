//! `punchsync-core` — shared types, config, and time handling.
//!
//! # Overview
//!
//! Everything the sync pipeline crates agree on lives here: the transient
//! punch record types, the sync report, configuration loading
//! (`punchsync.toml` + `PUNCHSYNC_*` env overrides), the fixed-offset civil
//! clock, and the upstream timestamp normalizer.
//!
//! The upstream attendance system speaks local civil time at a fixed UTC
//! offset (+05:30 by default). Nothing in this crate ever consults the host
//! timezone — `clock::local_now` shifts true UTC by the configured offset.

pub mod clock;
pub mod config;
pub mod error;
pub mod normalize;
pub mod types;

pub use config::PunchsyncConfig;
pub use error::{CoreError, Result};
pub use types::{NormalizedPunch, RawPunch, SyncReport};
