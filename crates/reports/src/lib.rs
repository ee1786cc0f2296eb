//! Sales reports over finalized orders.
//!
//! Every report only counts completed orders whose `created_at` falls
//! inside the [`ReportWindow`]. Pending and canceled orders are ignored.

pub mod error;
pub mod sales;
pub mod window;

pub use error::{ReportError, Result};
pub use sales::{
    DailySales, HourlySales, ProductSales, SalesSummary, ToppingPopularity, average_ticket,
    popular_toppings, sales_by_day, sales_by_hour, sales_by_product, summarize,
};
pub use window::ReportWindow;
