//! Sales reductions over finalized orders.

use std::collections::{BTreeMap, HashMap};

use catalog::{ProductId, ToppingId};
use chrono::{NaiveDate, Timelike};
use common::Money;
use domain::Order;
use serde::Serialize;

use crate::window::ReportWindow;

/// Revenue of one local calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySales {
    pub date: NaiveDate,
    pub total: Money,
    pub orders: u64,
}

/// Revenue of one local hour of the day, aggregated across days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlySales {
    pub hour: u32,
    pub total: Money,
    pub orders: u64,
}

/// Units sold and revenue of one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSales {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u64,
    pub total: Money,
}

/// How many line items carried a topping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToppingPopularity {
    pub topping_id: ToppingId,
    pub topping_name: String,
    pub count: u64,
}

/// All reports for one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesSummary {
    pub window: ReportWindow,
    pub orders: u64,
    pub revenue: Money,
    pub average_ticket: Money,
    pub by_day: Vec<DailySales>,
    pub by_hour: Vec<HourlySales>,
    pub by_product: Vec<ProductSales>,
    pub popular_toppings: Vec<ToppingPopularity>,
}

/// Revenue per local day, oldest first. Days without sales are omitted.
pub fn sales_by_day(orders: &[Order], window: &ReportWindow) -> Vec<DailySales> {
    let mut days: BTreeMap<NaiveDate, (Money, u64)> = BTreeMap::new();
    for order in window.select(orders) {
        let date = order
            .created_at()
            .with_timezone(&window.offset())
            .date_naive();
        let entry = days.entry(date).or_insert((Money::zero(), 0));
        entry.0 += order.total();
        entry.1 += 1;
    }

    days.into_iter()
        .map(|(date, (total, orders))| DailySales {
            date,
            total,
            orders,
        })
        .collect()
}

/// Revenue per local hour. Always returns 24 buckets, hour 0 first.
pub fn sales_by_hour(orders: &[Order], window: &ReportWindow) -> Vec<HourlySales> {
    let mut hours: Vec<HourlySales> = (0..24)
        .map(|hour| HourlySales {
            hour,
            total: Money::zero(),
            orders: 0,
        })
        .collect();

    for order in window.select(orders) {
        let hour = order.created_at().with_timezone(&window.offset()).hour() as usize;
        let bucket = &mut hours[hour];
        bucket.total += order.total();
        bucket.orders += 1;
    }
    hours
}

/// Units and revenue per product, best sellers first.
///
/// Revenue is the sum of line prices, so topping charges count toward the
/// product they were added to.
pub fn sales_by_product(orders: &[Order], window: &ReportWindow) -> Vec<ProductSales> {
    let mut products: HashMap<&ProductId, ProductSales> = HashMap::new();
    for item in window.select(orders).flat_map(Order::items) {
        let product = item.product();
        let entry = products.entry(&product.id).or_insert_with(|| ProductSales {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity: 0,
            total: Money::zero(),
        });
        entry.quantity += u64::from(item.quantity());
        entry.total += item.price();
    }

    let mut sales: Vec<ProductSales> = products.into_values().collect();
    sales.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.product_name.cmp(&b.product_name))
    });
    sales
}

/// Mean order total, rounded to the nearest centavo. Zero without orders.
pub fn average_ticket(orders: &[Order], window: &ReportWindow) -> Money {
    let (revenue, count) = revenue_and_count(orders, window);
    mean(revenue, count)
}

/// Topping usage, most popular first.
///
/// A topping counts once per line item that carries it, regardless of the
/// item's quantity.
pub fn popular_toppings(orders: &[Order], window: &ReportWindow) -> Vec<ToppingPopularity> {
    let mut toppings: HashMap<&ToppingId, ToppingPopularity> = HashMap::new();
    for item in window.select(orders).flat_map(Order::items) {
        for topping in item.toppings() {
            toppings
                .entry(&topping.id)
                .or_insert_with(|| ToppingPopularity {
                    topping_id: topping.id.clone(),
                    topping_name: topping.name.clone(),
                    count: 0,
                })
                .count += 1;
        }
    }

    let mut popular: Vec<ToppingPopularity> = toppings.into_values().collect();
    popular.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.topping_name.cmp(&b.topping_name))
    });
    popular
}

/// Builds every report for the window.
pub fn summarize(orders: &[Order], window: &ReportWindow) -> SalesSummary {
    let (revenue, count) = revenue_and_count(orders, window);
    SalesSummary {
        window: *window,
        orders: count,
        revenue,
        average_ticket: mean(revenue, count),
        by_day: sales_by_day(orders, window),
        by_hour: sales_by_hour(orders, window),
        by_product: sales_by_product(orders, window),
        popular_toppings: popular_toppings(orders, window),
    }
}

fn revenue_and_count(orders: &[Order], window: &ReportWindow) -> (Money, u64) {
    window
        .select(orders)
        .fold((Money::zero(), 0), |(revenue, count), order| {
            (revenue + order.total(), count + 1)
        })
}

fn mean(revenue: Money, count: u64) -> Money {
    let Ok(count) = i64::try_from(count) else {
        return Money::zero();
    };
    if count == 0 {
        return Money::zero();
    }
    // totals are never negative
    let cents = revenue.cents();
    Money::from_cents((cents + count / 2) / count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Catalog, SizeId, ToppingId};
    use chrono::{DateTime, TimeZone, Utc};
    use common::{ItemId, OrderId};
    use domain::{OrderItem, OrderNumber, OrderStatus};

    fn item(product: &str, size: &str, toppings: &[&str], quantity: u32) -> OrderItem {
        let menu = Catalog::default_menu();
        let ids: Vec<ToppingId> = toppings.iter().map(|id| ToppingId::new(*id)).collect();
        OrderItem::new(
            ItemId::new(),
            menu.product(&product.into()).unwrap().clone(),
            menu.size(&SizeId::new(size)).unwrap().clone(),
            menu.resolve_toppings(&ids).unwrap(),
            quantity,
            None,
        )
    }

    fn order(
        number: u64,
        status: OrderStatus,
        created_at: DateTime<Utc>,
        items: Vec<OrderItem>,
    ) -> Order {
        Order::restore(
            OrderId::new(),
            OrderNumber::new(number),
            status,
            items,
            created_at,
            Some(created_at),
        )
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, hour, 30, 0).unwrap()
    }

    fn sample() -> Vec<Order> {
        vec![
            // 12,00 * 1.5 + 2,00 = 20,00
            order(
                1,
                OrderStatus::Completed,
                at(1, 15),
                vec![item("1", "medium", &["t1"], 1)],
            ),
            // 2 * 10,00 = 20,00 plus 14,00 + 2,00 + 1,50 = 17,50
            order(
                2,
                OrderStatus::Completed,
                at(1, 18),
                vec![
                    item("4", "small", &[], 2),
                    item("2", "small", &["t1", "t2"], 1),
                ],
            ),
            order(
                3,
                OrderStatus::Canceled,
                at(1, 18),
                vec![item("3", "large", &["t1"], 5)],
            ),
            // 12,00 + 2,00 = 14,00
            order(
                4,
                OrderStatus::Completed,
                at(2, 2),
                vec![item("1", "small", &["t1"], 1)],
            ),
        ]
    }

    #[test]
    fn test_canceled_orders_are_excluded() {
        let orders = sample();
        let summary = summarize(&orders, &ReportWindow::all_time());
        assert_eq!(summary.orders, 3);
        assert_eq!(summary.revenue, Money::from_cents(2000 + 3750 + 1400));
        assert!(
            summary
                .by_product
                .iter()
                .all(|sales| sales.product_id != ProductId::new("3"))
        );
    }

    #[test]
    fn test_sales_by_day_in_utc() {
        let orders = sample();
        let days = sales_by_day(&orders, &ReportWindow::all_time());
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(days[0].orders, 2);
        assert_eq!(days[0].total, Money::from_cents(5750));
        assert_eq!(days[1].total, Money::from_cents(1400));
    }

    #[test]
    fn test_sales_by_day_uses_local_offset() {
        let orders = sample();
        let window = ReportWindow::all_time()
            .with_utc_offset_minutes(-180)
            .unwrap();
        let days = sales_by_day(&orders, &window);
        // 02:30 UTC on the 2nd is 23:30 on the 1st in UTC-3
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].orders, 3);
    }

    #[test]
    fn test_sales_by_hour_has_all_buckets() {
        let orders = sample();
        let hours = sales_by_hour(&orders, &ReportWindow::all_time());
        assert_eq!(hours.len(), 24);
        assert_eq!(hours[18].orders, 1);
        assert_eq!(hours[18].total, Money::from_cents(3750));
        assert_eq!(hours[0].total, Money::zero());

        let local = ReportWindow::all_time()
            .with_utc_offset_minutes(-180)
            .unwrap();
        let hours = sales_by_hour(&orders, &local);
        assert_eq!(hours[12].orders, 1);
        assert_eq!(hours[23].orders, 1);
    }

    #[test]
    fn test_sales_by_product_sorted_by_revenue() {
        let orders = sample();
        let products = sales_by_product(&orders, &ReportWindow::all_time());
        let names: Vec<&str> = products.iter().map(|p| p.product_name.as_str()).collect();
        assert_eq!(
            names,
            ["Açaí Tradicional", "Sorvete de Chocolate", "Açaí com Banana"]
        );
        assert_eq!(products[0].quantity, 2);
        assert_eq!(products[0].total, Money::from_cents(3400));
        assert_eq!(products[1].quantity, 2);
    }

    #[test]
    fn test_popular_toppings_count_items_not_units() {
        let mut orders = sample();
        orders.push(order(
            5,
            OrderStatus::Completed,
            at(3, 10),
            vec![item("2", "small", &["t2"], 4)],
        ));
        let toppings = popular_toppings(&orders, &ReportWindow::all_time());
        assert_eq!(toppings[0].topping_id, ToppingId::new("t1"));
        assert_eq!(toppings[0].count, 3);
        assert_eq!(toppings[1].topping_name, "Banana");
        assert_eq!(toppings[1].count, 2);
    }

    #[test]
    fn test_average_ticket_rounds_and_handles_empty() {
        let orders = sample();
        // 7150 / 3 = 2383.33
        assert_eq!(
            average_ticket(&orders, &ReportWindow::all_time()),
            Money::from_cents(2383)
        );
        assert_eq!(
            average_ticket(&[], &ReportWindow::all_time()),
            Money::zero()
        );
    }

    #[test]
    fn test_window_filters_by_created_at() {
        let orders = sample();
        let window = ReportWindow::new(at(1, 0), at(1, 18)).unwrap();
        let summary = summarize(&orders, &window);
        assert_eq!(summary.orders, 2);
        assert_eq!(summary.average_ticket, Money::from_cents(2875));
    }

    #[test]
    fn test_pending_orders_are_excluded() {
        let orders = vec![order(
            1,
            OrderStatus::Pending,
            at(1, 10),
            vec![item("1", "small", &[], 1)],
        )];
        let summary = summarize(&orders, &ReportWindow::all_time());
        assert_eq!(summary.orders, 0);
        assert!(summary.by_product.is_empty());
    }
}
