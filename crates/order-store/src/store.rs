use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::OrderId;
use domain::{Order, OrderNumber, OrderStatus};

use crate::Result;

/// Durable storage for orders.
///
/// Implementations do not retry; callers decide what a failure means.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Inserts or replaces an order.
    async fn save_order(&self, order: &Order) -> Result<()>;

    /// Changes the status of a stored order.
    ///
    /// Fails with `NotFound` when the order was never saved.
    async fn update_order_status(&self, order_id: OrderId, status: OrderStatus) -> Result<()>;

    /// Loads up to `limit` orders, newest first.
    async fn load_recent_orders(&self, limit: usize) -> Result<Vec<Order>>;

    /// Loads every order created within `[from, to]`, newest first.
    async fn load_orders_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Order>>;
}

/// Source of order numbers.
///
/// Numbers handed out by one sequence are strictly increasing.
#[async_trait]
pub trait OrderSequence: Send + Sync {
    /// Returns the next order number.
    async fn next_order_number(&self) -> Result<OrderNumber>;
}

#[async_trait]
impl<T: OrderStore + ?Sized> OrderStore for Arc<T> {
    async fn save_order(&self, order: &Order) -> Result<()> {
        (**self).save_order(order).await
    }

    async fn update_order_status(&self, order_id: OrderId, status: OrderStatus) -> Result<()> {
        (**self).update_order_status(order_id, status).await
    }

    async fn load_recent_orders(&self, limit: usize) -> Result<Vec<Order>> {
        (**self).load_recent_orders(limit).await
    }

    async fn load_orders_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Order>> {
        (**self).load_orders_between(from, to).await
    }
}

#[async_trait]
impl<T: OrderSequence + ?Sized> OrderSequence for Arc<T> {
    async fn next_order_number(&self) -> Result<OrderNumber> {
        (**self).next_order_number().await
    }
}
