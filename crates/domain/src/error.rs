//! Error classification shared by every layer above the domain.

use serde::Serialize;

/// Broad category of a failed operation.
///
/// Validation and state errors are raised before any mutation. External
/// errors come from collaborators (store, printer, settings) and never undo
/// an in-memory transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required input was missing or malformed.
    Validation,

    /// The operation is not allowed in the current lifecycle state.
    InvalidState,

    /// A referenced line item or order does not exist.
    NotFound,

    /// A collaborator failed.
    External,
}

impl ErrorKind {
    /// Returns the kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::InvalidState => "invalid_state",
            ErrorKind::NotFound => "not_found",
            ErrorKind::External => "external",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
