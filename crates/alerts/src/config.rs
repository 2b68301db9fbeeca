//! Alerting configuration loaded from environment variables.

use std::time::Duration;

use xstation_core::Locale;

/// Poll cadences, thresholds, and display locale for the alert monitors.
///
/// All fields have defaults matching the production dashboard. In a
/// deployment, override via environment variables.
#[derive(Debug, Clone)]
pub struct AlertsConfig {
    /// How often the booking monitor polls (default: 30 s).
    pub booking_poll_interval: Duration,
    /// How often the stock monitor polls (default: 60 s).
    pub stock_poll_interval: Duration,
    /// Stock level at or below which an item counts as low (default: 10).
    pub low_stock_threshold: u32,
    /// Locale for notification titles and bodies (default: English).
    pub locale: Locale,
}

impl AlertsConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default |
    /// |------------------------------|---------|
    /// | `BOOKING_POLL_INTERVAL_SECS` | `30`    |
    /// | `STOCK_POLL_INTERVAL_SECS`   | `60`    |
    /// | `LOW_STOCK_THRESHOLD`        | `10`    |
    /// | `XSTATION_LOCALE`            | `en`    |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let booking_poll_interval = std::env::var("BOOKING_POLL_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.booking_poll_interval);

        let stock_poll_interval = std::env::var("STOCK_POLL_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.stock_poll_interval);

        let low_stock_threshold = std::env::var("LOW_STOCK_THRESHOLD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.low_stock_threshold);

        let locale = std::env::var("XSTATION_LOCALE")
            .map(|v| Locale::from_tag(&v))
            .unwrap_or(defaults.locale);

        Self {
            booking_poll_interval,
            stock_poll_interval,
            low_stock_threshold,
            locale,
        }
    }
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            booking_poll_interval: Duration::from_secs(30),
            stock_poll_interval: Duration::from_secs(60),
            low_stock_threshold: 10,
            locale: Locale::En,
        }
    }
}
