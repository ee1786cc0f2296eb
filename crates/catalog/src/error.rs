//! Catalog error types.

use thiserror::Error;

/// Errors raised while loading or validating catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A category spelling that maps to no canonical category.
    #[error("Unknown {kind} category: {value:?}")]
    UnknownCategory { kind: &'static str, value: String },

    /// A price below zero.
    #[error("Negative price for {entity} {id}")]
    NegativePrice { entity: &'static str, id: String },

    /// A size multiplier below zero.
    #[error("Negative price multiplier for size {id}")]
    NegativeMultiplier { id: String },

    /// An amount that cannot be represented in centavos.
    #[error("Price out of range for {entity} {id}")]
    AmountOutOfRange { entity: &'static str, id: String },

    /// Two entries share the same id.
    #[error("Duplicate {entity} id: {id}")]
    DuplicateId { entity: &'static str, id: String },

    /// An entry with a blank id or name.
    #[error("Missing {field} for {entity} {id:?}")]
    MissingField {
        entity: &'static str,
        field: &'static str,
        id: String,
    },

    /// The catalog source could not be read.
    #[error("Catalog source error: {0}")]
    Source(String),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
