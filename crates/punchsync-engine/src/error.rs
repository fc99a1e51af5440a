use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    /// Upstream unreachable, timed out, or non-2xx — attempt aborted before
    /// any write.
    #[error("fetch failed: {0}")]
    Fetch(#[from] punchsync_upstream::FetchError),

    /// Storage infrastructure failure — the batch rolled back.
    #[error("persistence failed: {0}")]
    Store(#[from] punchsync_store::StoreError),

    #[error(transparent)]
    Core(#[from] punchsync_core::CoreError),

    /// Explicit-range sync called with missing or unparsable bounds.
    #[error("invalid range: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, SyncError>;
