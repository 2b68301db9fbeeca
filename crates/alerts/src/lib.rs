//! Background alert pollers for the X-Station dashboard.
//!
//! Two monitors poll the X-Station API on independent cadences and feed
//! the notification service:
//!
//! - [`BookingMonitor`] — bookings ending soon (30 s poll plus a local
//!   one-second countdown on each active item).
//! - [`StockMonitor`] — cafeteria items at or below the low-stock
//!   threshold (60 s poll).
//!
//! Each monitor owns a [`NoveltyTracker`] so an alert is announced once,
//! when its id first appears in a poll, rather than on every tick. Fetch
//! failures are soft: logged, then ignored until the next scheduled tick.

pub mod booking;
pub mod config;
pub mod novelty;
pub mod source;
pub mod stock;

pub use booking::BookingMonitor;
pub use config::AlertsConfig;
pub use novelty::{NoveltyTracker, TickNovelty};
pub use source::{BookingAlertSource, SourceError, StockAlertSource, XStationApi};
pub use stock::StockMonitor;
