//! Shared types for the point-of-sale workspace.

pub mod money;
pub mod types;

pub use money::Money;
pub use types::{ItemId, OrderId};
