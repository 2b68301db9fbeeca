//! Shared domain types for the X-Station alerting core.
//!
//! This crate holds the data model that the alert monitors and the
//! notification layer agree on:
//!
//! - [`BookingAlert`] — a room booking whose end time falls inside the
//!   server-defined "ending soon" window.
//! - [`StockItem`] — a cafeteria item at or below the low-stock threshold.
//! - [`locale`] — bilingual (English/Arabic) numeral and duration
//!   formatting used in notification bodies and badge counts.

pub mod alert;
pub mod locale;
pub mod types;

pub use alert::{BookingAlert, StockItem};
pub use locale::Locale;
