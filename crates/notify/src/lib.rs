//! X-Station notification queue and display pipeline.
//!
//! Serializes transient banner notifications so at most one is visible at
//! a time, in strict arrival order:
//!
//! - [`Notification`] — one notification event: title, body, severity,
//!   optional auto-dismiss duration, optional live countdown.
//! - [`NotificationCenter`] — the synchronous FIFO state machine (pending
//!   queue + single current slot). It holds no timers of its own.
//! - [`NotificationService`] — the async shell that owns the one-second
//!   timer, applies it to the center, and publishes the current
//!   notification to renderers over a `tokio::sync::watch` channel.

pub mod center;
pub mod event;
pub mod service;

pub use center::{DismissReason, Displayed, NotificationCenter};
pub use event::{Notification, NotificationId, Severity};
pub use service::{DisplayedView, NotificationService};
