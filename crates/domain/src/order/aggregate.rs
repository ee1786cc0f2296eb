//! Order aggregate implementation.

use chrono::{DateTime, Utc};
use common::{ItemId, Money, OrderId};
use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregate;
use crate::pricing::clamp_quantity;

use super::{
    ItemSelection, OrderError, OrderEvent, OrderItem, OrderNumber, OrderStatus,
    events::{ItemAddedData, OrderStartedData},
    item::normalize_notes,
};

/// Order aggregate root.
///
/// Holds the ordered line items of one customer order and its lifecycle
/// status. `total` always equals the sum of the item prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredOrder")]
pub struct Order {
    id: OrderId,
    order_number: OrderNumber,
    items: Vec<OrderItem>,
    total: Money,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    finalized_at: Option<DateTime<Utc>>,
}

impl Aggregate for Order {
    type Id = OrderId;
    type Event = OrderEvent;
    type Error = OrderError;

    fn aggregate_type() -> &'static str {
        "Order"
    }

    fn id(&self) -> OrderId {
        self.id
    }

    fn apply(&mut self, event: Self::Event) {
        match event {
            OrderEvent::OrderStarted(data) => *self = Self::from_started(data),
            OrderEvent::ItemAdded(data) => {
                self.items.push(OrderItem::new(
                    data.item_id,
                    data.product,
                    data.size,
                    data.toppings,
                    data.quantity,
                    data.notes,
                ));
                self.recompute_total();
            }
            OrderEvent::ItemRemoved(data) => {
                self.items.retain(|item| item.id() != data.item_id);
                self.recompute_total();
            }
            OrderEvent::ItemQuantityUpdated(data) => {
                if let Some(item) = self.item_mut(data.item_id) {
                    item.set_quantity(data.new_quantity);
                }
                self.recompute_total();
            }
            OrderEvent::ItemToppingsUpdated(data) => {
                if let Some(item) = self.item_mut(data.item_id) {
                    item.set_toppings(data.toppings);
                }
                self.recompute_total();
            }
            OrderEvent::ItemNotesUpdated(data) => {
                if let Some(item) = self.item_mut(data.item_id) {
                    item.set_notes(data.notes);
                }
            }
            OrderEvent::OrderCompleted(data) => {
                self.status = OrderStatus::Completed;
                self.finalized_at = Some(data.completed_at);
            }
            OrderEvent::OrderCanceled(data) => {
                self.status = OrderStatus::Canceled;
                self.finalized_at = Some(data.canceled_at);
            }
        }
    }
}

// Construction
impl Order {
    /// Starts an empty pending order.
    pub fn start(order_id: OrderId, order_number: OrderNumber) -> Self {
        Self::from_started(OrderStartedData {
            order_id,
            order_number,
            created_at: Utc::now(),
        })
    }

    /// Builds the order described by an OrderStarted event.
    pub fn from_started(data: OrderStartedData) -> Self {
        Self {
            id: data.order_id,
            order_number: data.order_number,
            items: Vec::new(),
            total: Money::zero(),
            status: OrderStatus::Pending,
            created_at: data.created_at,
            finalized_at: None,
        }
    }

    /// Rebuilds an order from persisted parts. The total is recomputed.
    pub fn restore(
        id: OrderId,
        order_number: OrderNumber,
        status: OrderStatus,
        items: Vec<OrderItem>,
        created_at: DateTime<Utc>,
        finalized_at: Option<DateTime<Utc>>,
    ) -> Self {
        let mut order = Self {
            id,
            order_number,
            items,
            total: Money::zero(),
            status,
            created_at,
            finalized_at,
        };
        order.recompute_total();
        order
    }

    fn recompute_total(&mut self) {
        self.total = self.items.iter().map(OrderItem::price).sum();
    }

    fn item_mut(&mut self, item_id: ItemId) -> Option<&mut OrderItem> {
        self.items.iter_mut().find(|item| item.id() == item_id)
    }
}

// Query methods
impl Order {
    /// Returns the order number.
    pub fn order_number(&self) -> OrderNumber {
        self.order_number
    }

    /// Returns the current status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the items in insertion order.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns an item by ID.
    pub fn item(&self, item_id: ItemId) -> Option<&OrderItem> {
        self.items.iter().find(|item| item.id() == item_id)
    }

    /// Returns the number of line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity over all line items.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity())).sum()
    }

    /// Returns the order total.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Returns when the order was started.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the order was completed or canceled.
    pub fn finalized_at(&self) -> Option<DateTime<Utc>> {
        self.finalized_at
    }

    /// Returns true if the order has items.
    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    /// Returns true if the order is still being built.
    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    /// Returns true if the order is completed or canceled.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

// Command methods (return events)
impl Order {
    /// Adds a configured item.
    ///
    /// The requested quantity is clamped to at least one.
    pub fn add_item(&self, selection: ItemSelection) -> Result<Vec<OrderEvent>, OrderError> {
        self.add_item_with_id(ItemId::new(), selection)
    }

    /// Adds a configured item under a caller-chosen ID.
    pub fn add_item_with_id(
        &self,
        item_id: ItemId,
        selection: ItemSelection,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        self.ensure_can_modify("adicionar item")?;

        let product = selection.product.ok_or(OrderError::MissingProduct)?;
        let size = selection.size.ok_or(OrderError::MissingSize)?;

        Ok(vec![OrderEvent::ItemAdded(ItemAddedData {
            item_id,
            product,
            size,
            toppings: selection.toppings,
            quantity: clamp_quantity(selection.quantity),
            notes: normalize_notes(selection.notes),
        })])
    }

    /// Removes an item.
    pub fn remove_item(&self, item_id: ItemId) -> Result<Vec<OrderEvent>, OrderError> {
        self.ensure_can_modify("remover item")?;
        self.find_item(item_id)?;

        Ok(vec![OrderEvent::item_removed(item_id)])
    }

    /// Sets an item's quantity, clamped to at least one.
    ///
    /// Returns no events when the quantity does not change.
    pub fn update_item_quantity(
        &self,
        item_id: ItemId,
        requested: i64,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        self.ensure_can_modify("alterar a quantidade")?;
        let item = self.find_item(item_id)?;

        let new_quantity = clamp_quantity(requested);
        if new_quantity == item.quantity() {
            return Ok(vec![]);
        }

        Ok(vec![OrderEvent::item_quantity_updated(
            item_id,
            item.quantity(),
            new_quantity,
        )])
    }

    /// Replaces an item's toppings.
    pub fn update_item_toppings(
        &self,
        item_id: ItemId,
        toppings: Vec<catalog::Topping>,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        self.ensure_can_modify("alterar os adicionais")?;
        self.find_item(item_id)?;

        Ok(vec![OrderEvent::item_toppings_updated(item_id, toppings)])
    }

    /// Replaces an item's notes. Blank notes clear them.
    pub fn update_item_notes(
        &self,
        item_id: ItemId,
        notes: Option<String>,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        self.ensure_can_modify("alterar as observações")?;
        self.find_item(item_id)?;

        Ok(vec![OrderEvent::item_notes_updated(
            item_id,
            normalize_notes(notes),
        )])
    }

    /// Completes the order.
    pub fn complete(&self) -> Result<Vec<OrderEvent>, OrderError> {
        if !self.status.can_complete() {
            return Err(OrderError::InvalidStateTransition {
                current_state: self.status,
                action: "finalizar",
            });
        }

        if !self.has_items() {
            return Err(OrderError::NoItems);
        }

        Ok(vec![OrderEvent::order_completed()])
    }

    /// Cancels the order.
    pub fn cancel(&self) -> Result<Vec<OrderEvent>, OrderError> {
        if !self.status.can_cancel() {
            return Err(OrderError::InvalidStateTransition {
                current_state: self.status,
                action: "cancelar",
            });
        }

        Ok(vec![OrderEvent::order_canceled()])
    }

    fn ensure_can_modify(&self, action: &'static str) -> Result<(), OrderError> {
        if self.status.can_modify_items() {
            Ok(())
        } else {
            Err(OrderError::InvalidStateTransition {
                current_state: self.status,
                action,
            })
        }
    }

    fn find_item(&self, item_id: ItemId) -> Result<&OrderItem, OrderError> {
        self.item(item_id)
            .ok_or(OrderError::ItemNotFound { item_id })
    }
}

#[derive(Deserialize)]
struct StoredOrder {
    id: OrderId,
    order_number: OrderNumber,
    #[serde(default)]
    items: Vec<OrderItem>,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    #[serde(default)]
    finalized_at: Option<DateTime<Utc>>,
}

impl From<StoredOrder> for Order {
    fn from(stored: StoredOrder) -> Self {
        Order::restore(
            stored.id,
            stored.order_number,
            stored.status,
            stored.items,
            stored.created_at,
            stored.finalized_at,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Catalog, SizeId, ToppingId};

    fn menu() -> Catalog {
        Catalog::default_menu()
    }

    fn pending_order() -> Order {
        Order::start(OrderId::new(), OrderNumber::new(1))
    }

    fn selection(product: &str, size: &str, toppings: &[&str]) -> ItemSelection {
        let menu = menu();
        let ids: Vec<ToppingId> = toppings.iter().map(|id| ToppingId::new(*id)).collect();
        ItemSelection::new(menu.product(&product.into()).unwrap().clone())
            .with_size(menu.size(&SizeId::new(size)).unwrap().clone())
            .with_toppings(menu.resolve_toppings(&ids).unwrap())
    }

    fn order_with_item() -> (Order, ItemId) {
        let mut order = pending_order();
        let events = order
            .execute(|o| o.add_item(selection("1", "medium", &["t1"])))
            .unwrap();
        let OrderEvent::ItemAdded(data) = &events[0] else {
            panic!("expected ItemAdded");
        };
        (order, data.item_id)
    }

    #[test]
    fn test_start_order() {
        let order = pending_order();
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.order_number(), OrderNumber::new(1));
        assert!(!order.has_items());
        assert_eq!(order.total(), Money::zero());
        assert!(order.finalized_at().is_none());
    }

    #[test]
    fn test_add_item_prices_line_and_total() {
        let (order, item_id) = order_with_item();
        let item = order.item(item_id).unwrap();
        assert_eq!(item.price(), Money::from_cents(2000));
        assert_eq!(order.total(), Money::from_cents(2000));
    }

    #[test]
    fn test_add_item_requires_product_and_size() {
        let order = pending_order();

        let no_product = ItemSelection::default();
        assert_eq!(order.add_item(no_product), Err(OrderError::MissingProduct));

        let no_size = ItemSelection::new(menu().products()[0].clone());
        assert_eq!(order.add_item(no_size), Err(OrderError::MissingSize));
    }

    #[test]
    fn test_add_item_clamps_quantity() {
        let mut order = pending_order();
        order
            .execute(|o| o.add_item(selection("4", "small", &[]).with_quantity(-3)))
            .unwrap();
        assert_eq!(order.items()[0].quantity(), 1);
        assert_eq!(order.total(), Money::from_cents(1000));
    }

    #[test]
    fn test_update_quantity_reprices() {
        let (mut order, item_id) = order_with_item();

        order
            .execute(|o| o.update_item_quantity(item_id, 3))
            .unwrap();
        assert_eq!(order.item(item_id).unwrap().quantity(), 3);
        assert_eq!(order.total(), Money::from_cents(6000));

        order
            .execute(|o| o.update_item_quantity(item_id, 0))
            .unwrap();
        assert_eq!(order.item(item_id).unwrap().quantity(), 1);
        assert_eq!(order.total(), Money::from_cents(2000));
    }

    #[test]
    fn test_unchanged_quantity_produces_no_events() {
        let (order, item_id) = order_with_item();
        assert!(order.update_item_quantity(item_id, 1).unwrap().is_empty());
    }

    #[test]
    fn test_update_toppings_and_notes() {
        let (mut order, item_id) = order_with_item();
        let toppings = menu()
            .resolve_toppings(&[ToppingId::new("t3"), ToppingId::new("t4")])
            .unwrap();

        order
            .execute(|o| o.update_item_toppings(item_id, toppings))
            .unwrap();
        assert_eq!(order.total(), Money::from_cents(2050));

        order
            .execute(|o| o.update_item_notes(item_id, Some("pouco granola".into())))
            .unwrap();
        assert_eq!(order.item(item_id).unwrap().notes(), Some("pouco granola"));
        assert_eq!(order.total(), Money::from_cents(2050));
    }

    #[test]
    fn test_remove_item() {
        let (mut order, item_id) = order_with_item();
        order.execute(|o| o.remove_item(item_id)).unwrap();
        assert!(!order.has_items());
        assert_eq!(order.total(), Money::zero());
    }

    #[test]
    fn test_unknown_item_is_not_found() {
        let (order, _) = order_with_item();
        let missing = ItemId::new();
        let expected = Err(OrderError::ItemNotFound { item_id: missing });

        assert_eq!(order.remove_item(missing), expected);
        assert_eq!(order.update_item_quantity(missing, 2), expected);
        assert_eq!(order.update_item_toppings(missing, vec![]), expected);
        assert_eq!(order.update_item_notes(missing, None), expected);
    }

    #[test]
    fn test_complete_empty_order_fails() {
        let mut order = pending_order();
        assert_eq!(order.execute(|o| o.complete()), Err(OrderError::NoItems));
        assert_eq!(order.status(), OrderStatus::Pending);
    }

    #[test]
    fn test_complete_order() {
        let (mut order, _) = order_with_item();
        order.execute(|o| o.complete()).unwrap();
        assert_eq!(order.status(), OrderStatus::Completed);
        assert!(order.finalized_at().is_some());
    }

    #[test]
    fn test_terminal_orders_reject_mutation() {
        let (mut completed, item_id) = order_with_item();
        completed.execute(|o| o.complete()).unwrap();

        let (mut canceled, _) = order_with_item();
        canceled.execute(|o| o.cancel()).unwrap();
        assert_eq!(canceled.status(), OrderStatus::Canceled);

        for order in [&completed, &canceled] {
            let errors = [
                order.add_item(selection("1", "small", &[])).unwrap_err(),
                order.remove_item(item_id).unwrap_err(),
                order.update_item_quantity(item_id, 2).unwrap_err(),
                order.complete().unwrap_err(),
                order.cancel().unwrap_err(),
            ];
            for err in errors {
                assert_eq!(err.kind(), crate::ErrorKind::InvalidState);
            }
        }
    }

    #[test]
    fn test_failed_command_leaves_state_untouched() {
        let (mut order, item_id) = order_with_item();
        let before = order.clone();

        let result = order.execute(|o| o.update_item_quantity(ItemId::new(), 5));
        assert!(result.is_err());
        assert_eq!(order, before);
        assert_eq!(order.item(item_id).unwrap().quantity(), 1);
    }

    #[test]
    fn test_replaying_events_rebuilds_state() {
        let mut order = pending_order();
        let mut log = vec![OrderEvent::OrderStarted(OrderStartedData {
            order_id: order.id(),
            order_number: order.order_number(),
            created_at: order.created_at(),
        })];

        log.extend(
            order
                .execute(|o| o.add_item(selection("2", "large", &["t6"])))
                .unwrap(),
        );
        log.extend(order.execute(|o| o.complete()).unwrap());

        let mut replayed = Order::start(OrderId::new(), OrderNumber::new(99));
        replayed.apply_events(log);
        assert_eq!(replayed, order);
    }

    #[test]
    fn test_deserialized_total_is_recomputed() {
        let (order, _) = order_with_item();
        let mut json = serde_json::to_value(&order).unwrap();
        json["total"] = serde_json::json!({ "cents": 999_999 });

        let restored: Order = serde_json::from_value(json).unwrap();
        assert_eq!(restored.total(), Money::from_cents(2000));
        assert_eq!(restored, order);
    }
}
