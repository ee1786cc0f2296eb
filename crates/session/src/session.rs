//! The operator's order session.

use std::collections::HashSet;

use catalog::Topping;
use chrono::{DateTime, Utc};
use common::{ItemId, OrderId};
use domain::{
    Aggregate, DomainEvent, ItemSelection, Order, OrderError, OrderEvent, OrderStatus,
};
use order_store::{OrderSequence, OrderStore};

use crate::error::{Result, SessionError};
use crate::notification::{Finalized, Notification, SyncReport};
use crate::services::{PrinterSettingsProvider, ReceiptPrinter, ReceiptType};

/// Default number of orders loaded into history at startup.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Holds the current order and the history of finalized orders for one
/// operator, and hands finalized orders to the collaborators.
///
/// Validation and state errors are returned before anything changes.
/// Collaborator failures during finalization are reported as
/// notifications and never undo the transition.
pub struct OrderSession<S, N, P, C>
where
    S: OrderStore,
    N: OrderSequence,
    P: ReceiptPrinter,
    C: PrinterSettingsProvider,
{
    store: S,
    sequence: N,
    printer: P,
    settings: C,
    current: Option<Order>,
    /// Newest first.
    history: Vec<Order>,
    /// Orders known to exist in the store.
    stored: HashSet<OrderId>,
    /// Completed orders whose save failed, oldest first.
    unsynced: Vec<Order>,
}

impl<S, N, P, C> OrderSession<S, N, P, C>
where
    S: OrderStore,
    N: OrderSequence,
    P: ReceiptPrinter,
    C: PrinterSettingsProvider,
{
    /// Creates a session with no current order and empty history.
    pub fn new(store: S, sequence: N, printer: P, settings: C) -> Self {
        Self {
            store,
            sequence,
            printer,
            settings,
            current: None,
            history: Vec::new(),
            stored: HashSet::new(),
            unsynced: Vec::new(),
        }
    }

    /// Returns the order store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the receipt printer.
    pub fn printer(&self) -> &P {
        &self.printer
    }

    /// Returns the printer settings provider.
    pub fn settings(&self) -> &C {
        &self.settings
    }

    /// Returns the order being built, if any.
    pub fn current_order(&self) -> Option<&Order> {
        self.current.as_ref()
    }

    /// Returns finalized orders, newest first.
    pub fn history(&self) -> &[Order] {
        &self.history
    }

    /// Looks up a finalized order by ID.
    pub fn history_order(&self, order_id: OrderId) -> Option<&Order> {
        self.history.iter().find(|order| order.id() == order_id)
    }

    /// Returns completed orders that could not be saved.
    pub fn unsynced_orders(&self) -> &[Order] {
        &self.unsynced
    }

    /// Returns true if the order is known to be durably stored.
    pub fn is_stored(&self, order_id: OrderId) -> bool {
        self.stored.contains(&order_id)
    }

    /// Starts a new empty order.
    ///
    /// Fails with `OrderPending` if an unfinished order exists.
    #[tracing::instrument(skip(self))]
    pub async fn start_new_order(&mut self) -> Result<&Order> {
        if let Some(order) = &self.current {
            return Err(OrderError::OrderPending {
                order_number: order.order_number(),
            }
            .into());
        }

        let number = self.sequence.next_order_number().await?;
        tracing::info!(order_number = %number, "order started");
        Ok(self.current.insert(Order::start(OrderId::new(), number)))
    }

    /// Starts a new order, canceling the unfinished one first.
    ///
    /// Returns the canceled order, if there was one.
    #[tracing::instrument(skip(self))]
    pub async fn start_new_order_replacing(&mut self) -> Result<Option<Finalized>> {
        let number = self.sequence.next_order_number().await?;

        let replaced = if self.current.is_some() {
            Some(self.cancel_order().await?)
        } else {
            None
        };

        tracing::info!(order_number = %number, replaced = replaced.is_some(), "order started");
        self.current = Some(Order::start(OrderId::new(), number));
        Ok(replaced)
    }

    /// Adds an item to the current order, starting one if needed.
    ///
    /// Returns the new item's ID.
    pub async fn add_item(&mut self, selection: ItemSelection) -> Result<ItemId> {
        if selection.product.is_none() {
            return Err(OrderError::MissingProduct.into());
        }
        if selection.size.is_none() {
            return Err(OrderError::MissingSize.into());
        }
        if self.current.is_none() {
            self.start_new_order().await?;
        }

        let item_id = ItemId::new();
        self.execute(|order| order.add_item_with_id(item_id, selection))?;
        Ok(item_id)
    }

    /// Removes an item from the current order.
    pub fn remove_item(&mut self, item_id: ItemId) -> Result<()> {
        self.execute(|order| order.remove_item(item_id))
    }

    /// Sets an item's quantity, clamped to at least one.
    pub fn update_item_quantity(&mut self, item_id: ItemId, quantity: i64) -> Result<()> {
        self.execute(|order| order.update_item_quantity(item_id, quantity))
    }

    /// Replaces an item's toppings.
    pub fn update_item_toppings(&mut self, item_id: ItemId, toppings: Vec<Topping>) -> Result<()> {
        self.execute(|order| order.update_item_toppings(item_id, toppings))
    }

    /// Replaces an item's notes.
    pub fn update_item_notes(&mut self, item_id: ItemId, notes: Option<String>) -> Result<()> {
        self.execute(|order| order.update_item_notes(item_id, notes))
    }

    /// Completes the current order, saves it and prints its receipts.
    ///
    /// The order is completed and moved to history before the store is
    /// called. A failed save leaves it unsynced and skips printing.
    #[tracing::instrument(skip(self))]
    pub async fn complete_order(&mut self) -> Result<Finalized> {
        let Some(order) = self.current.as_mut() else {
            return Err(OrderError::NoCurrentOrder.into());
        };
        order.execute(|o| o.complete())?;

        let Some(order) = self.current.take() else {
            return Err(OrderError::NoCurrentOrder.into());
        };
        self.history.insert(0, order.clone());
        metrics::counter!("orders_completed_total").increment(1);
        metrics::histogram!("order_total_cents").record(order.total().cents() as f64);

        let mut notifications = Vec::new();

        if let Err(err) = self.store.save_order(&order).await {
            tracing::error!(order_number = %order.order_number(), error = %err, "failed to save order");
            metrics::counter!("order_save_failures_total").increment(1);
            notifications.push(Notification::save_failed());
            self.unsynced.push(order.clone());
            return Ok(Finalized {
                order,
                notifications,
            });
        }
        self.stored.insert(order.id());
        notifications.push(Notification::order_completed(order.order_number()));

        match self.settings.printer_settings().await {
            Ok(settings) if settings.auto_print => {
                let receipt_type = ReceiptType::from_settings(&settings);
                if let Err(err) = self.printer.print_receipt(&order, receipt_type).await {
                    tracing::warn!(order_number = %order.order_number(), error = %err, "failed to print receipt");
                    metrics::counter!("receipt_print_failures_total").increment(1);
                    notifications.push(Notification::print_failed());
                }
            }
            Ok(_) => {
                tracing::debug!(order_number = %order.order_number(), "auto print disabled");
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to read printer settings");
                notifications.push(Notification::settings_failed());
            }
        }

        tracing::info!(
            order_number = %order.order_number(),
            total = %order.total(),
            items = order.item_count(),
            "order completed"
        );
        Ok(Finalized {
            order,
            notifications,
        })
    }

    /// Cancels the current order and moves it to history.
    ///
    /// The stored copy is updated only if the order was saved before.
    /// Nothing is printed.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_order(&mut self) -> Result<Finalized> {
        let Some(order) = self.current.as_mut() else {
            return Err(OrderError::NoCurrentOrder.into());
        };
        order.execute(|o| o.cancel())?;

        let Some(order) = self.current.take() else {
            return Err(OrderError::NoCurrentOrder.into());
        };
        self.history.insert(0, order.clone());
        metrics::counter!("orders_canceled_total").increment(1);

        let mut notifications = Vec::new();
        if self.stored.contains(&order.id())
            && let Err(err) = self
                .store
                .update_order_status(order.id(), OrderStatus::Canceled)
                .await
        {
            tracing::error!(order_number = %order.order_number(), error = %err, "failed to update order status");
            notifications.push(Notification::cancel_failed());
        }
        if notifications.is_empty() {
            notifications.push(Notification::order_canceled(order.order_number()));
        }

        tracing::info!(order_number = %order.order_number(), "order canceled");
        Ok(Finalized {
            order,
            notifications,
        })
    }

    /// Loads recent orders from the store into history.
    ///
    /// Local orders missing from the store, such as unsynced ones, are
    /// kept. The newest stored pending order is resumed as the current
    /// order when there is none; other pending orders are skipped with a
    /// warning. Returns the number of orders loaded.
    #[tracing::instrument(skip(self))]
    pub async fn load_history(&mut self, limit: usize) -> Result<usize> {
        let loaded = self.store.load_recent_orders(limit).await?;
        let loaded_ids: HashSet<OrderId> = loaded.iter().map(Order::id).collect();
        let count = loaded.len();

        let (pending, loaded): (Vec<Order>, Vec<Order>) =
            loaded.into_iter().partition(Order::is_pending);
        for order in pending {
            match &self.current {
                None => {
                    tracing::info!(order_number = %order.order_number(), "resuming stored pending order");
                    self.current = Some(order);
                }
                Some(current) if current.id() == order.id() => {}
                Some(current) => {
                    tracing::warn!(
                        order_number = %order.order_number(),
                        current_order_number = %current.order_number(),
                        "ignoring stored pending order"
                    );
                }
            }
        }

        let mut history: Vec<Order> = self
            .history
            .drain(..)
            .filter(|order| !loaded_ids.contains(&order.id()))
            .collect();
        history.extend(loaded);
        history.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then(b.order_number().cmp(&a.order_number()))
        });

        self.stored.extend(loaded_ids);
        self.history = history;
        tracing::info!(count, "history loaded");
        Ok(count)
    }

    /// Returns stored orders created within `[from, to]` together with
    /// matching unsynced local orders, newest first.
    ///
    /// Unlike `history`, the result does not depend on what was loaded or
    /// cleared locally.
    #[tracing::instrument(skip(self))]
    pub async fn orders_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Order>> {
        let mut orders = self.store.load_orders_between(from, to).await?;
        let stored_ids: HashSet<OrderId> = orders.iter().map(Order::id).collect();
        orders.extend(
            self.unsynced
                .iter()
                .filter(|order| !stored_ids.contains(&order.id()))
                .filter(|order| order.created_at() >= from && order.created_at() <= to)
                .cloned(),
        );
        orders.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then(b.order_number().cmp(&a.order_number()))
        });
        Ok(orders)
    }

    /// Clears the in-memory history. Stored orders are untouched.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Re-sends unsynced orders to the store.
    #[tracing::instrument(skip(self))]
    pub async fn retry_unsynced(&mut self) -> SyncReport {
        let mut report = SyncReport::default();
        let mut still_unsynced = Vec::new();

        for order in std::mem::take(&mut self.unsynced) {
            match self.store.save_order(&order).await {
                Ok(()) => {
                    self.stored.insert(order.id());
                    report.synced.push(order.order_number());
                }
                Err(err) => {
                    tracing::warn!(order_number = %order.order_number(), error = %err, "order still unsynced");
                    report.failed.push(order.order_number());
                    still_unsynced.push(order);
                }
            }
        }

        self.unsynced = still_unsynced;
        report
    }

    fn execute<F>(&mut self, command: F) -> Result<()>
    where
        F: FnOnce(&Order) -> std::result::Result<Vec<OrderEvent>, OrderError>,
    {
        let order = self
            .current
            .as_mut()
            .ok_or(SessionError::Order(OrderError::NoCurrentOrder))?;

        for event in order.execute(command)? {
            tracing::debug!(
                order_number = %order.order_number(),
                event_type = event.event_type(),
                total = %order.total(),
                "order event applied"
            );
        }
        Ok(())
    }
}
