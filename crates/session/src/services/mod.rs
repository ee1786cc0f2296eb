//! Collaborator service traits and in-memory implementations.

pub mod printer;
pub mod settings;

pub use printer::{InMemoryReceiptPrinter, LogReceiptPrinter, PrintJob, ReceiptPrinter, ReceiptType};
pub use settings::{
    ConnectionType, InMemoryPrinterSettings, PrinterSettings, PrinterSettingsProvider,
};
