//! User-facing outcome messages.

use domain::{Order, OrderNumber};
use serde::Serialize;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A short message shown to the operator after an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

impl Notification {
    /// Creates a success notification.
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Creates an error notification titled "Erro".
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: "Erro".to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn order_completed(number: OrderNumber) -> Self {
        Self::success(
            "Pedido Finalizado",
            format!("Comanda #{number} finalizada com sucesso"),
        )
    }

    pub(crate) fn order_canceled(number: OrderNumber) -> Self {
        Self::success("Pedido Cancelado", format!("Comanda #{number} foi cancelada"))
    }

    pub(crate) fn save_failed() -> Self {
        Self::error("Não foi possível finalizar o pedido")
    }

    pub(crate) fn cancel_failed() -> Self {
        Self::error("Não foi possível cancelar o pedido")
    }

    pub(crate) fn settings_failed() -> Self {
        Self::error("Não foi possível carregar as configurações da impressora")
    }

    pub(crate) fn print_failed() -> Self {
        Self::error("Não foi possível imprimir o recibo")
    }

    /// Returns true for error notifications.
    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

/// An order that just left the pending state, with the messages produced
/// while handing it to the collaborators.
#[derive(Debug, Clone, Serialize)]
pub struct Finalized {
    pub order: Order,
    pub notifications: Vec<Notification>,
}

impl Finalized {
    /// Returns true if any collaborator step reported an error.
    pub fn has_errors(&self) -> bool {
        self.notifications.iter().any(Notification::is_error)
    }
}

/// Outcome of re-sending unsynced orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Orders that are now durably stored.
    pub synced: Vec<OrderNumber>,
    /// Orders that failed again and remain unsynced.
    pub failed: Vec<OrderNumber>,
}
