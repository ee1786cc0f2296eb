//! API server entry point.

use std::sync::Arc;

use api::{AppState, Config};
use catalog::{Catalog, InMemoryCatalogSource};
use order_store::{
    InMemoryOrderSequence, InMemoryOrderStore, OrderSequence, OrderStore, PostgresOrderSequence,
    PostgresOrderStore,
};
use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

/// Picks PostgreSQL when a database URL is configured, memory otherwise.
async fn order_backend(
    config: &Config,
) -> Result<(Arc<dyn OrderStore>, Arc<dyn OrderSequence>), Box<dyn std::error::Error>> {
    match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new().max_connections(5).connect(url).await?;
            let store = PostgresOrderStore::new(pool.clone());
            store.run_migrations().await?;
            tracing::info!("using PostgreSQL order store");
            Ok((Arc::new(store), Arc::new(PostgresOrderSequence::new(pool))))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, orders are kept in memory");
            Ok((
                Arc::new(InMemoryOrderStore::new()),
                Arc::new(InMemoryOrderSequence::new()),
            ))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();

    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder()?;

    // 3. Load the catalog and pick the order backend
    let catalog = Catalog::load(&InMemoryCatalogSource::default_menu()).await?;
    let (store, sequence) = order_backend(&config).await?;

    // 4. Build the session and restore recent history
    let mut session = api::build_session(&config, store, sequence);
    match session.load_history(config.history_limit).await {
        Ok(count) => tracing::info!(count, "history restored"),
        Err(err) => tracing::warn!(error = %err, "could not load order history"),
    }

    // 5. Build the application
    let state = AppState::new(session, catalog, config.business.clone(), metrics_handle);
    let app = api::create_app(state);

    // 6. Start server
    let addr = config.addr();
    tracing::info!(%addr, "starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shut down gracefully");
    Ok(())
}
