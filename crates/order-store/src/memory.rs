use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::OrderId;
use domain::{Aggregate, Order, OrderNumber, OrderStatus};
use tokio::sync::RwLock;

use crate::{
    Result, StoreError,
    store::{OrderSequence, OrderStore},
};

#[derive(Debug, Default)]
struct InMemoryStoreState {
    orders: HashMap<OrderId, Order>,
    save_calls: usize,
    fail_on_save: bool,
    fail_on_update: bool,
    fail_on_load: bool,
}

/// In-memory order store for testing and the default binary.
///
/// Failures can be switched on per operation to exercise error paths.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderStore {
    state: Arc<RwLock<InMemoryStoreState>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every `save_order` call fail while set.
    pub async fn set_fail_on_save(&self, fail: bool) {
        self.state.write().await.fail_on_save = fail;
    }

    /// Makes every `update_order_status` call fail while set.
    pub async fn set_fail_on_update(&self, fail: bool) {
        self.state.write().await.fail_on_update = fail;
    }

    /// Makes every load call fail while set.
    pub async fn set_fail_on_load(&self, fail: bool) {
        self.state.write().await.fail_on_load = fail;
    }

    /// Returns the number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.state.read().await.orders.len()
    }

    /// Returns how many times `save_order` was called, including failures.
    pub async fn save_calls(&self) -> usize {
        self.state.read().await.save_calls
    }

    /// Returns a stored order.
    pub async fn get(&self, order_id: OrderId) -> Option<Order> {
        self.state.read().await.orders.get(&order_id).cloned()
    }

    /// Removes all stored orders.
    pub async fn clear(&self) {
        self.state.write().await.orders.clear();
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn save_order(&self, order: &Order) -> Result<()> {
        let mut state = self.state.write().await;
        state.save_calls += 1;
        if state.fail_on_save {
            return Err(StoreError::Unavailable("save rejected".to_string()));
        }

        state.orders.insert(order.id(), order.clone());
        Ok(())
    }

    async fn update_order_status(&self, order_id: OrderId, status: OrderStatus) -> Result<()> {
        let mut state = self.state.write().await;
        if state.fail_on_update {
            return Err(StoreError::Unavailable("update rejected".to_string()));
        }

        let order = state
            .orders
            .get_mut(&order_id)
            .ok_or(StoreError::NotFound(order_id))?;
        *order = with_status(order, status);
        Ok(())
    }

    async fn load_recent_orders(&self, limit: usize) -> Result<Vec<Order>> {
        let state = self.state.read().await;
        if state.fail_on_load {
            return Err(StoreError::Unavailable("load rejected".to_string()));
        }

        let mut orders: Vec<Order> = state.orders.values().cloned().collect();
        sort_newest_first(&mut orders);
        orders.truncate(limit);
        Ok(orders)
    }

    async fn load_orders_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Order>> {
        let state = self.state.read().await;
        if state.fail_on_load {
            return Err(StoreError::Unavailable("load rejected".to_string()));
        }

        let mut orders: Vec<Order> = state
            .orders
            .values()
            .filter(|order| order.created_at() >= from && order.created_at() <= to)
            .cloned()
            .collect();
        sort_newest_first(&mut orders);
        Ok(orders)
    }
}

fn sort_newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then(b.order_number().cmp(&a.order_number()))
    });
}

/// Copies an order with a different status.
///
/// Entering a terminal status stamps `finalized_at` if it was unset.
pub(crate) fn with_status(order: &Order, status: OrderStatus) -> Order {
    let finalized_at = if status.is_terminal() {
        order.finalized_at().or_else(|| Some(Utc::now()))
    } else {
        None
    };

    Order::restore(
        order.id(),
        order.order_number(),
        status,
        order.items().to_vec(),
        order.created_at(),
        finalized_at,
    )
}

/// Process-local order number counter.
#[derive(Debug, Clone)]
pub struct InMemoryOrderSequence {
    next: Arc<AtomicU64>,
}

impl InMemoryOrderSequence {
    /// Creates a sequence whose first number is 1.
    pub fn new() -> Self {
        Self::starting_at(OrderNumber::new(1))
    }

    /// Creates a sequence whose first number is `first`.
    pub fn starting_at(first: OrderNumber) -> Self {
        Self {
            next: Arc::new(AtomicU64::new(first.value())),
        }
    }

    /// Creates a sequence that continues after the highest number in `orders`.
    pub fn continuing_after<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        let last = orders
            .into_iter()
            .map(Order::order_number)
            .max()
            .unwrap_or(OrderNumber::new(0));
        Self::starting_at(last.next())
    }
}

impl Default for InMemoryOrderSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderSequence for InMemoryOrderSequence {
    async fn next_order_number(&self) -> Result<OrderNumber> {
        Ok(OrderNumber::new(self.next.fetch_add(1, Ordering::SeqCst)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Catalog, SizeId};
    use domain::ItemSelection;

    fn completed_order(number: u64) -> Order {
        let menu = Catalog::default_menu();
        let mut order = Order::start(OrderId::new(), OrderNumber::new(number));
        order
            .execute(|o| {
                o.add_item(
                    ItemSelection::new(menu.products()[0].clone())
                        .with_size(menu.size(&SizeId::new("small")).unwrap().clone()),
                )
            })
            .unwrap();
        order.execute(|o| o.complete()).unwrap();
        order
    }

    #[tokio::test]
    async fn test_save_and_load_newest_first() {
        let store = InMemoryOrderStore::new();
        for number in 1..=3 {
            store.save_order(&completed_order(number)).await.unwrap();
        }

        let orders = store.load_recent_orders(2).await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].order_number(), OrderNumber::new(3));
        assert_eq!(orders[1].order_number(), OrderNumber::new(2));
    }

    #[tokio::test]
    async fn test_save_replaces_existing() {
        let store = InMemoryOrderStore::new();
        let order = completed_order(1);
        store.save_order(&order).await.unwrap();
        store.save_order(&order).await.unwrap();

        assert_eq!(store.order_count().await, 1);
        assert_eq!(store.save_calls().await, 2);
    }

    #[tokio::test]
    async fn test_update_status() {
        let store = InMemoryOrderStore::new();
        let order = completed_order(1);
        store.save_order(&order).await.unwrap();

        store
            .update_order_status(order.id(), OrderStatus::Canceled)
            .await
            .unwrap();

        let stored = store.get(order.id()).await.unwrap();
        assert_eq!(stored.status(), OrderStatus::Canceled);
        assert_eq!(stored.total(), order.total());
        assert_eq!(stored.finalized_at(), order.finalized_at());
    }

    #[tokio::test]
    async fn test_update_unknown_order_is_not_found() {
        let store = InMemoryOrderStore::new();
        let result = store
            .update_order_status(OrderId::new(), OrderStatus::Canceled)
            .await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = InMemoryOrderStore::new();
        store.set_fail_on_save(true).await;
        assert!(store.save_order(&completed_order(1)).await.is_err());
        assert_eq!(store.order_count().await, 0);
        assert_eq!(store.save_calls().await, 1);

        store.set_fail_on_load(true).await;
        assert!(matches!(
            store.load_recent_orders(10).await,
            Err(StoreError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_load_between_filters_by_creation_time() {
        let store = InMemoryOrderStore::new();
        for number in 1..=3 {
            store.save_order(&completed_order(number)).await.unwrap();
        }
        let now = Utc::now();

        let all = store
            .load_orders_between(now - chrono::Duration::hours(1), now)
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].order_number(), OrderNumber::new(3));

        let none = store
            .load_orders_between(
                now + chrono::Duration::seconds(1),
                now + chrono::Duration::hours(1),
            )
            .await
            .unwrap();
        assert!(none.is_empty());

        store.set_fail_on_load(true).await;
        assert!(store.load_orders_between(now, now).await.is_err());
    }

    #[tokio::test]
    async fn test_sequence_is_strictly_increasing() {
        let sequence = InMemoryOrderSequence::new();
        let a = sequence.next_order_number().await.unwrap();
        let b = sequence.next_order_number().await.unwrap();
        let c = sequence.next_order_number().await.unwrap();
        assert_eq!(a, OrderNumber::new(1));
        assert!(a < b && b < c);
    }

    #[tokio::test]
    async fn test_sequence_continues_after_history() {
        let history = vec![completed_order(4), completed_order(9)];
        let sequence = InMemoryOrderSequence::continuing_after(&history);
        assert_eq!(
            sequence.next_order_number().await.unwrap(),
            OrderNumber::new(10)
        );
    }
}
