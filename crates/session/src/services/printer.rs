//! Receipt printer trait and implementations.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::OrderId;
use domain::{Aggregate, Order, OrderNumber};
use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::receipt::{self, BusinessProfile};

use super::settings::PrinterSettings;

/// Which tickets to print for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptType {
    Customer,
    Kitchen,
    Both,
}

impl ReceiptType {
    /// Picks the receipt type from the printer settings.
    ///
    /// Exactly one enabled flag selects that ticket; any other combination,
    /// including both flags off, prints both.
    pub fn from_settings(settings: &PrinterSettings) -> Self {
        match (
            settings.print_customer_receipt,
            settings.print_kitchen_receipt,
        ) {
            (true, false) => ReceiptType::Customer,
            (false, true) => ReceiptType::Kitchen,
            _ => ReceiptType::Both,
        }
    }

    /// Returns true if the customer receipt is printed.
    pub fn includes_customer(&self) -> bool {
        matches!(self, ReceiptType::Customer | ReceiptType::Both)
    }

    /// Returns true if the kitchen ticket is printed.
    pub fn includes_kitchen(&self) -> bool {
        matches!(self, ReceiptType::Kitchen | ReceiptType::Both)
    }
}

/// Trait for sending receipts to a printer.
#[async_trait]
pub trait ReceiptPrinter: Send + Sync {
    /// Prints the tickets selected by `receipt_type` for a finalized order.
    async fn print_receipt(&self, order: &Order, receipt_type: ReceiptType)
    -> Result<(), SessionError>;
}

#[async_trait]
impl<T: ReceiptPrinter + ?Sized> ReceiptPrinter for Arc<T> {
    async fn print_receipt(
        &self,
        order: &Order,
        receipt_type: ReceiptType,
    ) -> Result<(), SessionError> {
        (**self).print_receipt(order, receipt_type).await
    }
}

/// Printer that renders tickets and writes them to the log.
#[derive(Debug, Clone, Default)]
pub struct LogReceiptPrinter {
    profile: BusinessProfile,
}

impl LogReceiptPrinter {
    /// Creates a printer using the given business profile.
    pub fn new(profile: BusinessProfile) -> Self {
        Self { profile }
    }
}

#[async_trait]
impl ReceiptPrinter for LogReceiptPrinter {
    async fn print_receipt(
        &self,
        order: &Order,
        receipt_type: ReceiptType,
    ) -> Result<(), SessionError> {
        for ticket in receipt::render(order, receipt_type, &self.profile) {
            tracing::info!(
                order_number = %order.order_number(),
                ?receipt_type,
                "\n{ticket}"
            );
        }
        Ok(())
    }
}

/// A print request recorded by [`InMemoryReceiptPrinter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintJob {
    pub order_id: OrderId,
    pub order_number: OrderNumber,
    pub receipt_type: ReceiptType,
    pub tickets: Vec<String>,
}

#[derive(Debug, Default)]
struct InMemoryPrinterState {
    jobs: Vec<PrintJob>,
    fail_on_print: bool,
}

/// In-memory printer for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReceiptPrinter {
    profile: BusinessProfile,
    state: Arc<RwLock<InMemoryPrinterState>>,
}

impl InMemoryReceiptPrinter {
    /// Creates a new in-memory printer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the printer to fail on every print call.
    pub fn set_fail_on_print(&self, fail: bool) {
        self.state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .fail_on_print = fail;
    }

    /// Returns the recorded print jobs.
    pub fn jobs(&self) -> Vec<PrintJob> {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .jobs
            .clone()
    }

    /// Returns the number of recorded print jobs.
    pub fn job_count(&self) -> usize {
        self.jobs().len()
    }
}

#[async_trait]
impl ReceiptPrinter for InMemoryReceiptPrinter {
    async fn print_receipt(
        &self,
        order: &Order,
        receipt_type: ReceiptType,
    ) -> Result<(), SessionError> {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if state.fail_on_print {
            return Err(SessionError::Print("printer offline".to_string()));
        }

        state.jobs.push(PrintJob {
            order_id: order.id(),
            order_number: order.order_number(),
            receipt_type,
            tickets: receipt::render(order, receipt_type, &self.profile),
        });
        Ok(())
    }
}
