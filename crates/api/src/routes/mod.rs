pub mod catalog;
pub mod health;
pub mod history;
pub mod metrics;
pub mod orders;
pub mod reports;
pub mod settings;
