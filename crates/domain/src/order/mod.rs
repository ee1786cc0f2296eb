//! Order aggregate and related types.

mod aggregate;
mod events;
mod item;
mod state;

pub use aggregate::Order;
pub use events::{
    ItemAddedData, ItemNotesUpdatedData, ItemQuantityUpdatedData, ItemRemovedData,
    ItemToppingsUpdatedData, OrderCanceledData, OrderCompletedData, OrderEvent, OrderStartedData,
};
pub use item::{ItemSelection, OrderItem, OrderNumber};
pub use state::{OrderStatus, ParseStatusError};

use common::ItemId;
use thiserror::Error;

use crate::error::ErrorKind;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// The selection has no product.
    #[error("Selecione um produto")]
    MissingProduct,

    /// The selection has no size.
    #[error("Selecione um tamanho")]
    MissingSize,

    /// The order has no items.
    #[error("Adicione itens ao pedido")]
    NoItems,

    /// There is no current order to operate on.
    #[error("Nenhum pedido em andamento")]
    NoCurrentOrder,

    /// A pending order already exists.
    #[error("O pedido #{order_number} ainda está em andamento")]
    OrderPending { order_number: OrderNumber },

    /// Order is not in the expected state.
    #[error("Não é possível {action}: pedido {}", current_state.label())]
    InvalidStateTransition {
        current_state: OrderStatus,
        action: &'static str,
    },

    /// Item not found in order.
    #[error("Item não encontrado: {item_id}")]
    ItemNotFound { item_id: ItemId },
}

impl OrderError {
    /// Returns the broad category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::MissingProduct | OrderError::MissingSize | OrderError::NoItems => {
                ErrorKind::Validation
            }
            OrderError::NoCurrentOrder
            | OrderError::OrderPending { .. }
            | OrderError::InvalidStateTransition { .. } => ErrorKind::InvalidState,
            OrderError::ItemNotFound { .. } => ErrorKind::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(OrderError::MissingSize.kind(), ErrorKind::Validation);
        assert_eq!(OrderError::NoItems.kind(), ErrorKind::Validation);
        assert_eq!(OrderError::NoCurrentOrder.kind(), ErrorKind::InvalidState);
        assert_eq!(
            OrderError::InvalidStateTransition {
                current_state: OrderStatus::Completed,
                action: "adicionar item",
            }
            .kind(),
            ErrorKind::InvalidState
        );
        assert_eq!(
            OrderError::ItemNotFound {
                item_id: ItemId::new()
            }
            .kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_transition_message() {
        let err = OrderError::InvalidStateTransition {
            current_state: OrderStatus::Canceled,
            action: "finalizar",
        };
        assert_eq!(
            err.to_string(),
            "Não é possível finalizar: pedido cancelado"
        );
        assert_eq!(
            OrderError::NoCurrentOrder.to_string(),
            "Nenhum pedido em andamento"
        );
    }
}
