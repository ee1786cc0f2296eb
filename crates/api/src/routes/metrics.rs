//! Prometheus metrics endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::state::AppState;

/// GET /metrics: returns Prometheus-formatted metrics.
///
/// Session gauges are refreshed on every scrape.
pub async fn get(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    {
        let session = state.session.lock().await;
        ::metrics::gauge!("session_history_orders").set(session.history().len() as f64);
        ::metrics::gauge!("session_unsynced_orders").set(session.unsynced_orders().len() as f64);
    }

    (
        StatusCode::OK,
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        state.metrics_handle.render(),
    )
}
