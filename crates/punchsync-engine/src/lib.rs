//! `punchsync-engine` — window computation and sync orchestration.
//!
//! # Overview
//!
//! [`window::compute_window`] decides which `[from, to)` interval to request
//! next, in the upstream's civil time:
//!
//! | Case                     | Window                                    |
//! |--------------------------|-------------------------------------------|
//! | forced backfill          | `[now - N days, now]`, cursor ignored     |
//! | first run (no cursor)    | `[now - default backfill days, now]`      |
//! | incremental              | `[cursor - look-back, now]`               |
//!
//! The incremental look-back deliberately re-requests a sliver of already
//! persisted history; the storage uniqueness key absorbs the duplicates.
//!
//! [`sync::SyncEngine`] composes cursor read → window → fetch → normalize →
//! persist into one unit of work and reports
//! fetched/inserted/skipped/failed. It keeps no state between invocations —
//! the cursor is read from the database every time.

pub mod error;
pub mod sync;
pub mod window;

pub use error::{Result, SyncError};
pub use sync::SyncEngine;
pub use window::{compute_window, SyncWindow, WindowPolicy};
