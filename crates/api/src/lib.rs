//! HTTP API server for the açaí shop point of sale.
//!
//! Exposes one operator session over REST: the catalog, the order being
//! built, finalization, history, sales reports and printer settings, with
//! structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, patch, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::ApiError;
pub use state::{AppSession, AppState, build_session, create_default_state};

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health::check))
        .route("/metrics", get(routes::metrics::get))
        .route("/catalog", get(routes::catalog::get))
        .route("/orders", post(routes::orders::start))
        .route("/orders/current", get(routes::orders::current))
        .route("/orders/current/items", post(routes::orders::add_item))
        .route(
            "/orders/current/items/{item_id}",
            patch(routes::orders::update_item).delete(routes::orders::remove_item),
        )
        .route("/orders/current/complete", post(routes::orders::complete))
        .route("/orders/current/cancel", post(routes::orders::cancel))
        .route(
            "/orders/history",
            get(routes::history::list).delete(routes::history::clear),
        )
        .route("/orders/sync", post(routes::history::sync))
        .route("/reports", get(routes::reports::get))
        .route(
            "/settings/printer",
            get(routes::settings::get).put(routes::settings::update),
        )
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
