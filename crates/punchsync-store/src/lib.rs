//! `punchsync-store` — SQLite persistence for punch events.
//!
//! # Overview
//!
//! Two tables: `employees` (code → name, name written once and never
//! overwritten) and `punch_data`, deduplicated solely by the
//! `(emp_code, punch_time)` uniqueness key. [`persist::persist_batch`] wraps
//! a whole batch in one transaction — either every surviving record commits
//! or none do.
//!
//! The sync cursor is not stored anywhere: [`queries::last_punch_time`]
//! derives it from `MAX(punch_time)` on every call, so windows always
//! reflect durable state.

pub mod db;
pub mod error;
pub mod persist;
pub mod queries;

pub use error::{Result, StoreError};
pub use persist::{persist_batch, PersistStats};
pub use queries::{last_punch_time, StoreCounts};
