//! Order session for the point-of-sale core.
//!
//! The [`OrderSession`] owns the order being built and the history of
//! finalized orders. Completing an order follows a fixed sequence:
//! 1. Save the order
//! 2. Read the printer settings
//! 3. Print the receipts selected by the settings
//!
//! Each step can fail on its own and is reported as a [`Notification`].

pub mod error;
pub mod notification;
pub mod receipt;
pub mod services;
pub mod session;

pub use error::SessionError;
pub use notification::{Finalized, Notification, NotificationLevel, SyncReport};
pub use receipt::BusinessProfile;
pub use services::{
    ConnectionType, InMemoryPrinterSettings, InMemoryReceiptPrinter, LogReceiptPrinter, PrintJob,
    PrinterSettings, PrinterSettingsProvider, ReceiptPrinter, ReceiptType,
};
pub use session::{DEFAULT_HISTORY_LIMIT, OrderSession};
