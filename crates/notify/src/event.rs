//! The notification event type and its id scheme.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

/// Auto-dismiss duration applied when the producer does not override it.
pub const DEFAULT_DURATION: Duration = Duration::from_secs(8);

/// Severity of a notification, mapped to banner styling by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// An action completed.
    Success,
    /// Neutral information.
    Info,
    /// Something needs operator attention soon.
    Warning,
    /// Something went wrong or is already at its worst (e.g. sold out).
    Error,
}

/// Process-wide sequence for id generation.
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Unique id of a notification within one session.
///
/// Combines the enqueue timestamp (milliseconds) with a monotonically
/// increasing counter, so rapid enqueues within the same millisecond
/// still get distinct ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotificationId(String);

impl NotificationId {
    fn next() -> Self {
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let millis = chrono::Utc::now().timestamp_millis();
        Self(format!("{millis}-{seq}"))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One notification event, owned by the center from enqueue to dismissal.
///
/// Constructed via the per-severity constructors and enriched with the
/// builder methods [`with_duration`](Self::with_duration),
/// [`sticky`](Self::sticky), and [`with_countdown`](Self::with_countdown).
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Unique id, generated at construction.
    pub id: NotificationId,

    /// Short headline rendered in the banner.
    pub title: String,

    /// Body text rendered under the title.
    pub body: String,

    /// Banner severity.
    pub severity: Severity,

    /// Auto-dismiss timeout; `None` means manual dismissal only.
    pub duration: Option<Duration>,

    /// Starting value of the live countdown shown in the banner, if any.
    ///
    /// The countdown is informational: reaching zero stops it but does
    /// not dismiss the notification.
    pub countdown_seconds: Option<u32>,
}

impl Notification {
    /// Create a notification with the default auto-dismiss duration.
    pub fn new(severity: Severity, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: NotificationId::next(),
            title: title.into(),
            body: body.into(),
            severity,
            duration: Some(DEFAULT_DURATION),
            countdown_seconds: None,
        }
    }

    /// Shorthand for a [`Severity::Success`] notification.
    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Severity::Success, title, body)
    }

    /// Shorthand for a [`Severity::Info`] notification.
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Severity::Info, title, body)
    }

    /// Shorthand for a [`Severity::Warning`] notification.
    pub fn warning(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Severity::Warning, title, body)
    }

    /// Shorthand for a [`Severity::Error`] notification.
    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Severity::Error, title, body)
    }

    /// Override the auto-dismiss duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Disable auto-dismiss; the notification stays until dismissed.
    pub fn sticky(mut self) -> Self {
        self.duration = None;
        self
    }

    /// Attach a live countdown starting at `seconds`.
    pub fn with_countdown(mut self, seconds: u32) -> Self {
        self.countdown_seconds = Some(seconds);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_applies_default_duration() {
        let n = Notification::info("title", "body");
        assert_eq!(n.duration, Some(DEFAULT_DURATION));
        assert!(n.countdown_seconds.is_none());
    }

    #[test]
    fn builders_override_defaults() {
        let n = Notification::warning("t", "b")
            .with_duration(Duration::from_secs(10))
            .with_countdown(200);
        assert_eq!(n.duration, Some(Duration::from_secs(10)));
        assert_eq!(n.countdown_seconds, Some(200));

        let sticky = Notification::error("t", "b").sticky();
        assert!(sticky.duration.is_none());
    }

    #[test]
    fn ids_are_unique_under_rapid_construction() {
        let ids: Vec<NotificationId> = (0..1000)
            .map(|_| Notification::info("t", "b").id)
            .collect();

        let unique: std::collections::HashSet<&str> =
            ids.iter().map(NotificationId::as_str).collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn severity_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Severity::Warning).expect("should serialize"),
            r#""warning""#
        );
    }
}
