//! Session error types.

use domain::{ErrorKind, OrderError};
use order_store::StoreError;
use thiserror::Error;

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The order rejected the operation.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// The order store or sequence failed.
    #[error("Order store error: {0}")]
    Store(#[from] StoreError),

    /// The receipt printer failed.
    #[error("Printer error: {0}")]
    Print(String),

    /// The printer settings could not be read or written.
    #[error("Printer settings error: {0}")]
    Settings(String),
}

impl SessionError {
    /// Returns the broad category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::Order(err) => err.kind(),
            SessionError::Store(_) | SessionError::Print(_) | SessionError::Settings(_) => {
                ErrorKind::External
            }
        }
    }
}

/// Convenience type alias for session results.
pub type Result<T> = std::result::Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            SessionError::from(OrderError::NoItems).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            SessionError::from(StoreError::Unavailable("down".into())).kind(),
            ErrorKind::External
        );
        assert_eq!(
            SessionError::Print("paper jam".into()).kind(),
            ErrorKind::External
        );
    }
}
