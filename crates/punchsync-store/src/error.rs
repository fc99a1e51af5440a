use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying SQLite / rusqlite error — infrastructure failure, the
    /// whole batch rolls back.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored punch_time did not parse back as a timestamp.
    #[error("corrupt punch_time in storage: {raw:?}")]
    CorruptTimestamp { raw: String },
}

pub type Result<T> = std::result::Result<T, StoreError>;
