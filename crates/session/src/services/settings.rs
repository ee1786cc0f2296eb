//! Printer settings trait and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// How the receipt printer is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    Bluetooth,
    #[default]
    Usb,
}

/// Receipt printer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterSettings {
    pub connection_type: ConnectionType,
    #[serde(default)]
    pub printer_name: String,
    #[serde(default)]
    pub printer_address: String,
    pub auto_print: bool,
    pub print_customer_receipt: bool,
    pub print_kitchen_receipt: bool,
}

impl Default for PrinterSettings {
    fn default() -> Self {
        Self {
            connection_type: ConnectionType::Usb,
            printer_name: String::new(),
            printer_address: String::new(),
            auto_print: true,
            print_customer_receipt: true,
            print_kitchen_receipt: true,
        }
    }
}

/// Trait for reading and changing the printer configuration.
#[async_trait]
pub trait PrinterSettingsProvider: Send + Sync {
    /// Returns the current settings.
    async fn printer_settings(&self) -> Result<PrinterSettings, SessionError>;

    /// Replaces the settings and returns what was stored.
    async fn update_printer_settings(
        &self,
        settings: PrinterSettings,
    ) -> Result<PrinterSettings, SessionError>;
}

#[async_trait]
impl<T: PrinterSettingsProvider + ?Sized> PrinterSettingsProvider for Arc<T> {
    async fn printer_settings(&self) -> Result<PrinterSettings, SessionError> {
        (**self).printer_settings().await
    }

    async fn update_printer_settings(
        &self,
        settings: PrinterSettings,
    ) -> Result<PrinterSettings, SessionError> {
        (**self).update_printer_settings(settings).await
    }
}

#[derive(Debug, Default)]
struct InMemorySettingsState {
    settings: PrinterSettings,
    fail_on_read: bool,
}

/// In-memory printer settings for testing and the default binary.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPrinterSettings {
    state: Arc<RwLock<InMemorySettingsState>>,
}

impl InMemoryPrinterSettings {
    /// Creates a provider holding the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider holding the given settings.
    pub fn with_settings(settings: PrinterSettings) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemorySettingsState {
                settings,
                fail_on_read: false,
            })),
        }
    }

    /// Configures the provider to fail on every read.
    pub fn set_fail_on_read(&self, fail: bool) {
        self.write().fail_on_read = fail;
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, InMemorySettingsState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl PrinterSettingsProvider for InMemoryPrinterSettings {
    async fn printer_settings(&self) -> Result<PrinterSettings, SessionError> {
        let state = self
            .state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if state.fail_on_read {
            return Err(SessionError::Settings(
                "printer settings unavailable".to_string(),
            ));
        }
        Ok(state.settings.clone())
    }

    async fn update_printer_settings(
        &self,
        settings: PrinterSettings,
    ) -> Result<PrinterSettings, SessionError> {
        self.write().settings = settings.clone();
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_and_update() {
        let provider = InMemoryPrinterSettings::new();
        assert_eq!(
            provider.printer_settings().await.unwrap(),
            PrinterSettings::default()
        );

        let updated = PrinterSettings {
            connection_type: ConnectionType::Bluetooth,
            printer_name: "POS-58 Printer".to_string(),
            auto_print: false,
            ..PrinterSettings::default()
        };
        provider
            .update_printer_settings(updated.clone())
            .await
            .unwrap();
        assert_eq!(provider.printer_settings().await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_fail_on_read() {
        let provider = InMemoryPrinterSettings::new();
        provider.set_fail_on_read(true);
        assert!(matches!(
            provider.printer_settings().await,
            Err(SessionError::Settings(_))
        ));
    }

    #[test]
    fn test_settings_json_shape() {
        let json = serde_json::to_value(PrinterSettings::default()).unwrap();
        assert_eq!(json["connection_type"], "usb");
        assert_eq!(json["auto_print"], true);
    }
}
