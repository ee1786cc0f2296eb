//! Plain-text receipt rendering.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use domain::{Order, OrderItem};
use serde::{Deserialize, Serialize};

use crate::services::ReceiptType;

const RULE: &str = "----------------------------------------";

/// Shop details printed on the customer receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub name: String,
    pub address: String,
    pub phone: String,
    /// Offset from UTC, in minutes, used for printed timestamps.
    pub utc_offset_minutes: i32,
}

impl Default for BusinessProfile {
    fn default() -> Self {
        Self {
            name: "Açaí dos Sonhos".to_string(),
            address: String::new(),
            phone: String::new(),
            utc_offset_minutes: -180,
        }
    }
}

impl BusinessProfile {
    fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix())
    }

    fn format_time(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.offset())
            .format("%d/%m/%Y %H:%M")
            .to_string()
    }
}

/// Renders the customer receipt.
pub fn customer_receipt(order: &Order, profile: &BusinessProfile) -> String {
    let mut lines = vec![profile.name.clone()];
    if !profile.address.is_empty() {
        lines.push(profile.address.clone());
    }
    if !profile.phone.is_empty() {
        lines.push(format!("Tel: {}", profile.phone));
    }
    lines.extend([
        RULE.to_string(),
        "CUPOM NÃO FISCAL".to_string(),
        RULE.to_string(),
        format!("Comanda #{}", order.order_number()),
        format!("Data: {}", profile.format_time(order.created_at())),
        RULE.to_string(),
        "ITENS".to_string(),
        RULE.to_string(),
    ]);

    for (index, item) in order.items().iter().enumerate() {
        lines.push(format!("{}. {}", index + 1, item.product().name));
        lines.push(format!("   {} ({})", item.size().name, item.size().volume));
        if !item.toppings().is_empty() {
            lines.push(format!("   + {}", topping_names(item).join(", ")));
        }
        lines.push(format!(
            "   {}x {} = {}",
            item.quantity(),
            item.unit_price(),
            item.price()
        ));
        if let Some(notes) = item.notes() {
            lines.push(format!("   Obs: {notes}"));
        }
        lines.push(RULE.to_string());
    }

    lines.extend([
        format!("TOTAL: {}", order.total()),
        RULE.to_string(),
        "Agradecemos a preferência!".to_string(),
    ]);
    lines.join("\n")
}

/// Renders the kitchen ticket. Prices are omitted.
pub fn kitchen_ticket(order: &Order, profile: &BusinessProfile) -> String {
    let mut lines = vec![
        format!("{} - COZINHA", profile.name),
        RULE.to_string(),
        format!("COMANDA #{}", order.order_number()),
        format!("Data: {}", profile.format_time(order.created_at())),
        RULE.to_string(),
        "PREPARO".to_string(),
        RULE.to_string(),
    ];

    for (index, item) in order.items().iter().enumerate() {
        lines.push(format!(
            "{}. {}",
            index + 1,
            item.product().name.to_uppercase()
        ));
        lines.push(format!(
            "   {} ({}) - QTD: {}",
            item.size().name.to_uppercase(),
            item.size().volume,
            item.quantity()
        ));
        if !item.toppings().is_empty() {
            lines.push("   ADICIONAR:".to_string());
            for name in topping_names(item) {
                lines.push(format!("   - {}", name.to_uppercase()));
            }
        }
        if let Some(notes) = item.notes() {
            lines.push(format!("   OBS: {}", notes.to_uppercase()));
        }
        lines.push(RULE.to_string());
    }

    lines.join("\n")
}

/// Renders every ticket a receipt type asks for, customer first.
pub fn render(order: &Order, receipt_type: ReceiptType, profile: &BusinessProfile) -> Vec<String> {
    let mut tickets = Vec::with_capacity(2);
    if receipt_type.includes_customer() {
        tickets.push(customer_receipt(order, profile));
    }
    if receipt_type.includes_kitchen() {
        tickets.push(kitchen_ticket(order, profile));
    }
    tickets
}

fn topping_names(item: &OrderItem) -> Vec<&str> {
    item.toppings().iter().map(|t| t.name.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Catalog, SizeId, ToppingId};
    use chrono::TimeZone;
    use common::OrderId;
    use domain::{Aggregate, ItemSelection, OrderEvent, OrderNumber, OrderStartedData};

    fn sample_order() -> Order {
        let menu = Catalog::default_menu();
        let mut order = Order::from_started(OrderStartedData {
            order_id: OrderId::new(),
            order_number: OrderNumber::new(42),
            created_at: Utc.with_ymd_and_hms(2024, 3, 9, 17, 5, 0).unwrap(),
        });
        let toppings = menu
            .resolve_toppings(&[ToppingId::new("t1"), ToppingId::new("t3")])
            .unwrap();
        let events: Vec<OrderEvent> = order
            .execute(|o| {
                o.add_item(
                    ItemSelection::new(menu.products()[0].clone())
                        .with_size(menu.size(&SizeId::new("medium")).unwrap().clone())
                        .with_toppings(toppings)
                        .with_quantity(2)
                        .with_notes("sem açúcar"),
                )
            })
            .unwrap();
        assert_eq!(events.len(), 1);
        order
    }

    #[test]
    fn test_customer_receipt() {
        let profile = BusinessProfile {
            address: "Rua das Palmeiras, 10".to_string(),
            phone: "(11) 99999-0000".to_string(),
            ..BusinessProfile::default()
        };
        let receipt = customer_receipt(&sample_order(), &profile);

        assert!(receipt.starts_with("Açaí dos Sonhos\nRua das Palmeiras, 10\nTel: (11) 99999-0000"));
        assert!(receipt.contains("CUPOM NÃO FISCAL"));
        assert!(receipt.contains("Comanda #42"));
        assert!(receipt.contains("Data: 09/03/2024 14:05"));
        assert!(receipt.contains("1. Açaí Tradicional"));
        assert!(receipt.contains("   Médio (500ml)"));
        assert!(receipt.contains("   + Morango, Granola"));
        assert!(receipt.contains("   2x R$ 21,00 = R$ 42,00"));
        assert!(receipt.contains("   Obs: sem açúcar"));
        assert!(receipt.contains("TOTAL: R$ 42,00"));
        assert!(receipt.ends_with("Agradecemos a preferência!"));
    }

    #[test]
    fn test_customer_receipt_skips_blank_contact_lines() {
        let receipt = customer_receipt(&sample_order(), &BusinessProfile::default());
        assert!(receipt.starts_with(&format!("Açaí dos Sonhos\n{RULE}")));
        assert!(!receipt.contains("Tel:"));
    }

    #[test]
    fn test_kitchen_ticket() {
        let ticket = kitchen_ticket(&sample_order(), &BusinessProfile::default());

        assert!(ticket.starts_with("Açaí dos Sonhos - COZINHA"));
        assert!(ticket.contains("COMANDA #42"));
        assert!(ticket.contains("1. AÇAÍ TRADICIONAL"));
        assert!(ticket.contains("   MÉDIO (500ml) - QTD: 2"));
        assert!(ticket.contains("   ADICIONAR:\n   - MORANGO\n   - GRANOLA"));
        assert!(ticket.contains("   OBS: SEM AÇÚCAR"));
        assert!(!ticket.contains("R$"));
    }

    #[test]
    fn test_render_by_type() {
        let order = sample_order();
        let profile = BusinessProfile::default();

        assert_eq!(render(&order, ReceiptType::Both, &profile).len(), 2);
        let kitchen = render(&order, ReceiptType::Kitchen, &profile);
        assert_eq!(kitchen.len(), 1);
        assert!(kitchen[0].contains("COZINHA"));
        let customer = render(&order, ReceiptType::Customer, &profile);
        assert!(customer[0].contains("CUPOM NÃO FISCAL"));
    }
}
