use async_trait::async_trait;

use punchsync_core::RawPunch;

use crate::error::Result;

/// One fetch request: an employee filter plus a local-civil-time window,
/// bounds already formatted as `DD/MM/YYYY_HH:mm`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunchQuery {
    pub emp_code: String,
    pub from: String,
    pub to: String,
}

/// Source of raw punch records for a time window.
///
/// Implementations do one attempt per call — no internal retry. A transport
/// or status failure aborts the whole sync; the scheduler's next tick, with
/// its overlapping window, is the retry mechanism.
#[async_trait]
pub trait PunchSource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch(&self, query: &PunchQuery) -> Result<Vec<RawPunch>>;
}
