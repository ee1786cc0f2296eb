//! Printer settings endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use session::{PrinterSettings, PrinterSettingsProvider};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /settings/printer: the current printer configuration.
#[tracing::instrument(skip(state))]
pub async fn get(State(state): State<Arc<AppState>>) -> Result<Json<PrinterSettings>, ApiError> {
    let session = state.session.lock().await;
    Ok(Json(session.settings().printer_settings().await?))
}

/// PUT /settings/printer: replace the printer configuration.
#[tracing::instrument(skip(state))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    Json(settings): Json<PrinterSettings>,
) -> Result<Json<PrinterSettings>, ApiError> {
    let session = state.session.lock().await;
    let updated = session.settings().update_printer_settings(settings).await?;
    tracing::info!(auto_print = updated.auto_print, "printer settings updated");
    Ok(Json(updated))
}
