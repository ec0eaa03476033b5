//! Schedule loading error types.

use std::path::PathBuf;

/// Errors that can occur while loading the schedule table.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// The schedule file does not exist
    #[error("schedule file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The schedule file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV, including missing columns
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row with an unparseable time or direction
    #[error("invalid schedule row {row}: {message}")]
    InvalidRow { row: usize, message: String },
}
