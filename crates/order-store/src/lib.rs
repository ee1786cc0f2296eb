//! Order persistence.
//!
//! Provides the [`OrderStore`] and [`OrderSequence`] collaborator traits with
//! an in-memory implementation for tests and a PostgreSQL implementation.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::{InMemoryOrderSequence, InMemoryOrderStore};
pub use postgres::{PostgresOrderSequence, PostgresOrderStore};
pub use store::{OrderSequence, OrderStore};
