//! `punchsync-upstream` — fetch adapter for the attendance API.
//!
//! # Overview
//!
//! [`PunchSource`] is the seam between the sync engine and the upstream
//! transport. The production implementation, [`HttpPunchSource`], issues a
//! GET with `Empcode`/`FromDate`/`ToDate` query parameters and basic auth;
//! tests substitute stub sources.
//!
//! The upstream is loose about its response shape: the body may be JSON or a
//! JSON-encoded string, and the record array may be bare or wrapped under
//! `data` or `PunchData`. [`envelope`] handles all of that; an unrecognized
//! shape is an empty result, never an error.

pub mod envelope;
pub mod error;
pub mod http;
pub mod source;

pub use error::{FetchError, Result};
pub use http::HttpPunchSource;
pub use source::{PunchQuery, PunchSource};
