use thiserror::Error;

/// Fatal outcomes of an extraction run.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The table source failed (file missing, locked, unreadable).
    #[error(transparent)]
    Source(#[from] anyhow::Error),

    #[error("no transaction rows found ({rows_seen} rows inspected)")]
    NoTransactions { rows_seen: usize },
}
