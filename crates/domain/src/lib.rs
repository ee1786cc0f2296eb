//! Domain layer for the point-of-sale core.
//!
//! This crate provides:
//! - the pricing function for a line item
//! - the Order aggregate with its lifecycle state machine
//! - the error classification used by the session and HTTP layers

pub mod aggregate;
pub mod error;
pub mod order;
pub mod pricing;

pub use aggregate::{Aggregate, DomainEvent};
pub use error::ErrorKind;
pub use order::{
    ItemAddedData, ItemNotesUpdatedData, ItemQuantityUpdatedData, ItemRemovedData, ItemSelection,
    ItemToppingsUpdatedData, Order, OrderCanceledData, OrderCompletedData, OrderError, OrderEvent,
    OrderItem, OrderNumber, OrderStartedData, OrderStatus, ParseStatusError,
};
pub use pricing::{clamp_quantity, line_price, unit_price};
