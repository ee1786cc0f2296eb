//! Order domain events.

use catalog::{Product, Size, Topping};
use chrono::{DateTime, Utc};
use common::{ItemId, OrderId};
use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;

use super::OrderNumber;

/// Events that can occur on an order aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    /// Order was started.
    OrderStarted(OrderStartedData),

    /// Item was added to the order.
    ItemAdded(ItemAddedData),

    /// Item was removed from the order.
    ItemRemoved(ItemRemovedData),

    /// Item quantity was updated.
    ItemQuantityUpdated(ItemQuantityUpdatedData),

    /// Item toppings were replaced.
    ItemToppingsUpdated(ItemToppingsUpdatedData),

    /// Item notes were replaced.
    ItemNotesUpdated(ItemNotesUpdatedData),

    /// Order was completed.
    OrderCompleted(OrderCompletedData),

    /// Order was canceled.
    OrderCanceled(OrderCanceledData),
}

impl DomainEvent for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::OrderStarted(_) => "OrderStarted",
            OrderEvent::ItemAdded(_) => "ItemAdded",
            OrderEvent::ItemRemoved(_) => "ItemRemoved",
            OrderEvent::ItemQuantityUpdated(_) => "ItemQuantityUpdated",
            OrderEvent::ItemToppingsUpdated(_) => "ItemToppingsUpdated",
            OrderEvent::ItemNotesUpdated(_) => "ItemNotesUpdated",
            OrderEvent::OrderCompleted(_) => "OrderCompleted",
            OrderEvent::OrderCanceled(_) => "OrderCanceled",
        }
    }
}

/// Data for OrderStarted event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStartedData {
    /// The unique order ID.
    pub order_id: OrderId,

    /// The sequential number assigned at creation.
    pub order_number: OrderNumber,

    /// When the order was started.
    pub created_at: DateTime<Utc>,
}

/// Data for ItemAdded event.
///
/// Carries the selection, not the price; the price is derived on apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAddedData {
    pub item_id: ItemId,
    pub product: Product,
    pub size: Size,
    pub toppings: Vec<Topping>,
    pub quantity: u32,
    pub notes: Option<String>,
}

/// Data for ItemRemoved event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRemovedData {
    pub item_id: ItemId,
}

/// Data for ItemQuantityUpdated event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemQuantityUpdatedData {
    pub item_id: ItemId,

    /// Previous quantity.
    pub old_quantity: u32,

    /// New quantity.
    pub new_quantity: u32,
}

/// Data for ItemToppingsUpdated event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemToppingsUpdatedData {
    pub item_id: ItemId,
    pub toppings: Vec<Topping>,
}

/// Data for ItemNotesUpdated event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemNotesUpdatedData {
    pub item_id: ItemId,
    pub notes: Option<String>,
}

/// Data for OrderCompleted event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCompletedData {
    pub completed_at: DateTime<Utc>,
}

/// Data for OrderCanceled event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCanceledData {
    pub canceled_at: DateTime<Utc>,
}

// Convenience constructors
impl OrderEvent {
    /// Creates an OrderStarted event.
    pub fn order_started(order_id: OrderId, order_number: OrderNumber) -> Self {
        OrderEvent::OrderStarted(OrderStartedData {
            order_id,
            order_number,
            created_at: Utc::now(),
        })
    }

    /// Creates an ItemRemoved event.
    pub fn item_removed(item_id: ItemId) -> Self {
        OrderEvent::ItemRemoved(ItemRemovedData { item_id })
    }

    /// Creates an ItemQuantityUpdated event.
    pub fn item_quantity_updated(item_id: ItemId, old_quantity: u32, new_quantity: u32) -> Self {
        OrderEvent::ItemQuantityUpdated(ItemQuantityUpdatedData {
            item_id,
            old_quantity,
            new_quantity,
        })
    }

    /// Creates an ItemToppingsUpdated event.
    pub fn item_toppings_updated(item_id: ItemId, toppings: Vec<Topping>) -> Self {
        OrderEvent::ItemToppingsUpdated(ItemToppingsUpdatedData { item_id, toppings })
    }

    /// Creates an ItemNotesUpdated event.
    pub fn item_notes_updated(item_id: ItemId, notes: Option<String>) -> Self {
        OrderEvent::ItemNotesUpdated(ItemNotesUpdatedData { item_id, notes })
    }

    /// Creates an OrderCompleted event.
    pub fn order_completed() -> Self {
        OrderEvent::OrderCompleted(OrderCompletedData {
            completed_at: Utc::now(),
        })
    }

    /// Creates an OrderCanceled event.
    pub fn order_canceled() -> Self {
        OrderEvent::OrderCanceled(OrderCanceledData {
            canceled_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_types() {
        let event = OrderEvent::order_started(OrderId::new(), OrderNumber::new(1));
        assert_eq!(event.event_type(), "OrderStarted");
        assert_eq!(OrderEvent::order_completed().event_type(), "OrderCompleted");
        assert_eq!(OrderEvent::order_canceled().event_type(), "OrderCanceled");
    }

    #[test]
    fn test_event_serialization_is_tagged() {
        let item_id = ItemId::new();
        let event = OrderEvent::item_quantity_updated(item_id, 1, 3);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "ItemQuantityUpdated");
        assert_eq!(json["data"]["new_quantity"], 3);

        let back: OrderEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
