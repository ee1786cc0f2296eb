//! Order history endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;
use session::SyncReport;

use super::orders::OrderResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    /// Newest first.
    pub orders: Vec<OrderResponse>,
    /// Numbers of completed orders that have not reached the store.
    pub unsynced: Vec<u64>,
}

/// GET /orders/history: finalized orders of this session.
#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<Arc<AppState>>) -> Json<HistoryResponse> {
    let session = state.session.lock().await;
    Json(HistoryResponse {
        orders: session.history().iter().map(OrderResponse::from).collect(),
        unsynced: session
            .unsynced_orders()
            .iter()
            .map(|order| order.order_number().value())
            .collect(),
    })
}

/// DELETE /orders/history: forget the in-memory history.
#[tracing::instrument(skip(state))]
pub async fn clear(State(state): State<Arc<AppState>>) -> StatusCode {
    state.session.lock().await.clear_history();
    StatusCode::NO_CONTENT
}

/// POST /orders/sync: retry saving unsynced orders.
#[tracing::instrument(skip(state))]
pub async fn sync(State(state): State<Arc<AppState>>) -> Json<SyncReport> {
    let mut session = state.session.lock().await;
    let report = session.retry_unsynced().await;
    if !report.failed.is_empty() {
        tracing::warn!(failed = report.failed.len(), "some orders are still unsynced");
    }
    Json(report)
}
