//! Application configuration loaded from environment variables.

use session::{BusinessProfile, DEFAULT_HISTORY_LIMIT};

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `DATABASE_URL`: PostgreSQL connection string; orders stay in memory when unset
/// - `HISTORY_LIMIT`: orders loaded into history at startup (default: `50`)
/// - `BUSINESS_NAME`, `BUSINESS_ADDRESS`, `BUSINESS_PHONE`: receipt header
/// - `BUSINESS_UTC_OFFSET_MINUTES`: local time offset for receipts and reports (default: `-180`)
/// - `AUTO_PRINT`: print receipts after completion (default: `true`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub database_url: Option<String>,
    pub history_limit: usize,
    pub business: BusinessProfile,
    pub auto_print: bool,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            host: text("HOST").unwrap_or(defaults.host),
            port: text("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: text("RUST_LOG").unwrap_or(defaults.log_level),
            database_url: text("DATABASE_URL"),
            history_limit: text("HISTORY_LIMIT")
                .and_then(|n| n.parse().ok())
                .unwrap_or(defaults.history_limit),
            business: BusinessProfile {
                name: text("BUSINESS_NAME").unwrap_or(defaults.business.name),
                address: text("BUSINESS_ADDRESS").unwrap_or_default(),
                phone: text("BUSINESS_PHONE").unwrap_or_default(),
                utc_offset_minutes: text("BUSINESS_UTC_OFFSET_MINUTES")
                    .and_then(|m| m.parse().ok())
                    .unwrap_or(defaults.business.utc_offset_minutes),
            },
            auto_print: text("AUTO_PRINT")
                .and_then(|flag| parse_flag(&flag))
                .unwrap_or(defaults.auto_print),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            database_url: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
            business: BusinessProfile::default(),
            auto_print: true,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
