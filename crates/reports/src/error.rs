use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur when building a report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// The window ends before it starts.
    #[error("Invalid report window: {from} is after {to}")]
    InvalidWindow {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },

    /// The UTC offset is out of range.
    #[error("Invalid UTC offset: {minutes} minutes")]
    InvalidOffset { minutes: i32 },
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
