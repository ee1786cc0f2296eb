//! Shared application state.

use std::sync::Arc;

use catalog::Catalog;
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::{InMemoryOrderSequence, InMemoryOrderStore, OrderSequence, OrderStore};
use session::{
    BusinessProfile, InMemoryPrinterSettings, LogReceiptPrinter, OrderSession, PrinterSettings,
    PrinterSettingsProvider, ReceiptPrinter,
};
use tokio::sync::Mutex;

use crate::config::Config;

/// Operator session with collaborators chosen at startup.
pub type AppSession = OrderSession<
    Arc<dyn OrderStore>,
    Arc<dyn OrderSequence>,
    Arc<dyn ReceiptPrinter>,
    Arc<dyn PrinterSettingsProvider>,
>;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub session: Mutex<AppSession>,
    pub catalog: Catalog,
    pub business: BusinessProfile,
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    /// Creates the state around an existing session.
    pub fn new(
        session: AppSession,
        catalog: Catalog,
        business: BusinessProfile,
        metrics_handle: PrometheusHandle,
    ) -> Arc<Self> {
        Arc::new(Self {
            session: Mutex::new(session),
            catalog,
            business,
            metrics_handle,
        })
    }
}

/// Builds a session from the given store and sequence, printing to the log
/// with settings seeded from the configuration.
pub fn build_session(
    config: &Config,
    store: Arc<dyn OrderStore>,
    sequence: Arc<dyn OrderSequence>,
) -> AppSession {
    let printer: Arc<dyn ReceiptPrinter> =
        Arc::new(LogReceiptPrinter::new(config.business.clone()));
    let settings: Arc<dyn PrinterSettingsProvider> =
        Arc::new(InMemoryPrinterSettings::with_settings(PrinterSettings {
            auto_print: config.auto_print,
            ..PrinterSettings::default()
        }));
    OrderSession::new(store, sequence, printer, settings)
}

/// Creates the default application state with in-memory collaborators.
pub fn create_default_state(config: &Config, metrics_handle: PrometheusHandle) -> Arc<AppState> {
    let session = build_session(
        config,
        Arc::new(InMemoryOrderStore::new()),
        Arc::new(InMemoryOrderSequence::new()),
    );
    AppState::new(
        session,
        Catalog::default_menu(),
        config.business.clone(),
        metrics_handle,
    )
}
