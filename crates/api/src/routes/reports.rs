//! Sales report endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use chrono::{DateTime, Utc};
use reports::{ReportWindow, SalesSummary};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// GET /reports?from=&to=: sales over stored and unsynced orders.
///
/// Missing bounds are open. Days and hours are bucketed in the shop's
/// local time.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<SalesSummary>, ApiError> {
    let open = ReportWindow::all_time();
    let window = ReportWindow::new(query.from.unwrap_or(open.from), query.to.unwrap_or(open.to))?
        .with_utc_offset_minutes(state.business.utc_offset_minutes)?;

    let orders = {
        let session = state.session.lock().await;
        session.orders_between(window.from, window.to).await?
    };
    Ok(Json(reports::summarize(&orders, &window)))
}
