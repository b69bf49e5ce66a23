// ⚠️ Ledger Errors
// Domain reads never fail (missing data is zero). Only infrastructure can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The persisted blob is not JSON, or not a JSON object at the top level.
    #[error("stored snapshot is unreadable: {0}")]
    Snapshot(String),

    #[error("month index {0} is outside 0-11")]
    InvalidMonth(u32),

    #[error("year {year} is outside the selectable window {first}-{last}")]
    YearOutOfRange { year: i32, first: i32, last: i32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("wipe requires two confirmations")]
    WipeNotConfirmed,
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;
