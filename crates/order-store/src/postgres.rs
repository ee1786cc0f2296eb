use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::OrderId;
use domain::{Aggregate, Order, OrderItem, OrderNumber, OrderStatus};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{
    Result, StoreError,
    store::{OrderSequence, OrderStore},
};

/// PostgreSQL-backed order store.
///
/// Line items are stored as JSONB next to the order row.
#[derive(Clone)]
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    /// Creates a new PostgreSQL order store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_order(row: PgRow) -> Result<Order> {
        let order_id = OrderId::from_uuid(row.try_get::<Uuid, _>("id")?);
        let corrupt = |reason: String| StoreError::Corrupt { order_id, reason };

        let number: i64 = row.try_get("order_number")?;
        let number = u64::try_from(number)
            .map_err(|_| corrupt(format!("negative order number {number}")))?;

        let status: String = row.try_get("status")?;
        let status: OrderStatus = status.parse().map_err(|e| corrupt(format!("{e}")))?;

        let items: serde_json::Value = row.try_get("items")?;
        let items: Vec<OrderItem> = serde_json::from_value(items)?;

        let created_at: DateTime<Utc> = row.try_get("created_at")?;
        let finalized_at: Option<DateTime<Utc>> = row.try_get("finalized_at")?;

        Ok(Order::restore(
            order_id,
            OrderNumber::new(number),
            status,
            items,
            created_at,
            finalized_at,
        ))
    }
}

fn order_number_param(number: OrderNumber) -> Result<i64> {
    i64::try_from(number.value())
        .map_err(|_| StoreError::Unavailable(format!("order number {number} out of range")))
}

/// Clamps into the range `timestamptz` accepts, so open report windows bind.
fn timestamp_param(at: DateTime<Utc>) -> DateTime<Utc> {
    let earliest = DateTime::<Utc>::UNIX_EPOCH - chrono::Duration::days(365 * 4_000);
    let latest = DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::days(365 * 200_000);
    at.clamp(earliest, latest)
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    #[tracing::instrument(skip(self, order), fields(order_id = %order.id(), order_number = %order.order_number()))]
    async fn save_order(&self, order: &Order) -> Result<()> {
        let started = Instant::now();
        let items = serde_json::to_value(order.items())?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, order_number, status, total_cents, items, created_at, finalized_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                status = EXCLUDED.status,
                total_cents = EXCLUDED.total_cents,
                items = EXCLUDED.items,
                finalized_at = EXCLUDED.finalized_at,
                updated_at = NOW()
            "#,
        )
        .bind(order.id().as_uuid())
        .bind(order_number_param(order.order_number())?)
        .bind(order.status().as_str())
        .bind(order.total().cents())
        .bind(items)
        .bind(order.created_at())
        .bind(order.finalized_at())
        .execute(&self.pool)
        .await?;

        metrics::histogram!("order_store_save_duration_seconds")
            .record(started.elapsed().as_secs_f64());
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn update_order_status(&self, order_id: OrderId, status: OrderStatus) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE orders
            SET status = $2,
                finalized_at = CASE
                    WHEN $2 = 'pending' THEN NULL
                    ELSE COALESCE(finalized_at, NOW())
                END,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(order_id.as_uuid())
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(order_id));
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn load_recent_orders(&self, limit: usize) -> Result<Vec<Order>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query(
            r#"
            SELECT id, order_number, status, items, created_at, finalized_at
            FROM orders
            ORDER BY created_at DESC, order_number DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_order).collect()
    }

    #[tracing::instrument(skip(self))]
    async fn load_orders_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Order>> {
        let rows = sqlx::query(
            r#"
            SELECT id, order_number, status, items, created_at, finalized_at
            FROM orders
            WHERE created_at BETWEEN $1 AND $2
            ORDER BY created_at DESC, order_number DESC
            "#,
        )
        .bind(timestamp_param(from))
        .bind(timestamp_param(to))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_order).collect()
    }
}

/// Order numbers from the `order_number_seq` database sequence.
///
/// Every session connected to the same database shares one sequence.
#[derive(Clone)]
pub struct PostgresOrderSequence {
    pool: PgPool,
}

impl PostgresOrderSequence {
    /// Creates a sequence backed by the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderSequence for PostgresOrderSequence {
    async fn next_order_number(&self) -> Result<OrderNumber> {
        let next: i64 = sqlx::query_scalar("SELECT nextval('order_number_seq')")
            .fetch_one(&self.pool)
            .await?;

        u64::try_from(next)
            .map(OrderNumber::new)
            .map_err(|_| StoreError::Unavailable(format!("sequence returned {next}")))
    }
}
