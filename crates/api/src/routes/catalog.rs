//! Catalog endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use catalog::Catalog;

use crate::state::AppState;

/// GET /catalog: returns the menu.
pub async fn get(State(state): State<Arc<AppState>>) -> Json<Catalog> {
    Json(state.catalog.clone())
}
