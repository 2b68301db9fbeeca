//! FIFO notification state machine.
//!
//! [`NotificationCenter`] serializes display: a single `current` slot and
//! a pending queue. It is a pure state machine — the service layer calls
//! [`tick_second`](NotificationCenter::tick_second) once per second of
//! wall (or virtual) time, which keeps every transition deterministic
//! and unit-testable.

use std::collections::VecDeque;
use std::time::Duration;

use crate::event::{Notification, NotificationId};

const ONE_SECOND: Duration = Duration::from_secs(1);

/// Why a displayed notification was taken down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// The auto-dismiss duration elapsed.
    Timeout,
    /// The operator closed the banner.
    ManualClose,
    /// Explicitly removed by id by the producing component.
    Removed,
}

/// The notification currently occupying the display slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Displayed {
    /// The underlying notification event.
    pub notification: Notification,
    /// Time left until auto-dismiss; `None` for sticky notifications.
    pub remaining: Option<Duration>,
    /// Live countdown value, decremented each second, floored at zero.
    pub countdown: Option<u32>,
}

/// Pending queue plus single display slot.
///
/// Invariants:
/// - display order is strict FIFO; a later notification never shows
///   before an earlier one is dismissed;
/// - at most one notification is current at any instant;
/// - the countdown never goes negative.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    current: Option<Displayed>,
    pending: VecDeque<Notification>,
}

impl NotificationCenter {
    /// Create an empty, idle center.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a notification to the tail of the queue.
    ///
    /// If nothing is displaying, it is promoted to the display slot
    /// immediately.
    pub fn enqueue(&mut self, notification: Notification) {
        tracing::debug!(
            id = %notification.id,
            severity = ?notification.severity,
            "Notification enqueued"
        );
        self.pending.push_back(notification);
        self.promote();
    }

    /// Take down the current notification, promoting the next in line.
    ///
    /// Returns the dismissed notification, or `None` if nothing was
    /// displaying. Any running countdown stops with the dismissal.
    pub fn dismiss(&mut self, reason: DismissReason) -> Option<Notification> {
        let displayed = self.current.take()?;
        tracing::debug!(id = %displayed.notification.id, ?reason, "Notification dismissed");
        self.promote();
        Some(displayed.notification)
    }

    /// Remove a notification wherever it is.
    ///
    /// A pending match is deleted from the queue; a match on the current
    /// notification behaves as [`dismiss`](Self::dismiss) with
    /// [`DismissReason::Removed`]. Returns `true` if anything was removed.
    pub fn remove_by_id(&mut self, id: &NotificationId) -> bool {
        if self
            .current
            .as_ref()
            .is_some_and(|d| &d.notification.id == id)
        {
            self.dismiss(DismissReason::Removed);
            return true;
        }

        if let Some(pos) = self.pending.iter().position(|n| &n.id == id) {
            self.pending.remove(pos);
            return true;
        }

        false
    }

    /// Drop everything: pending queue and current slot.
    pub fn clear_all(&mut self) {
        self.pending.clear();
        self.current = None;
    }

    /// Apply one second of elapsed time to the current notification.
    ///
    /// Decrements the live countdown (floored at zero; reaching zero does
    /// not dismiss) and advances the auto-dismiss clock. A notification
    /// whose duration elapses is dismissed with [`DismissReason::Timeout`]
    /// and the next pending notification takes its place.
    pub fn tick_second(&mut self) {
        let timed_out = match self.current.as_mut() {
            None => false,
            Some(displayed) => {
                if let Some(countdown) = displayed.countdown.as_mut() {
                    *countdown = countdown.saturating_sub(1);
                }
                match displayed.remaining.as_mut() {
                    Some(remaining) => {
                        *remaining = remaining.saturating_sub(ONE_SECOND);
                        remaining.is_zero()
                    }
                    None => false,
                }
            }
        };

        if timed_out {
            self.dismiss(DismissReason::Timeout);
        }
    }

    /// The currently displayed notification, if any.
    pub fn current(&self) -> Option<&Displayed> {
        self.current.as_ref()
    }

    /// Number of notifications waiting behind the current one.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Whether the center has nothing displayed and nothing queued.
    pub fn is_idle(&self) -> bool {
        self.current.is_none() && self.pending.is_empty()
    }

    /// Fill the display slot from the queue head if it is empty.
    fn promote(&mut self) {
        if self.current.is_some() {
            return;
        }
        if let Some(notification) = self.pending.pop_front() {
            self.current = Some(Displayed {
                remaining: notification.duration,
                countdown: notification.countdown_seconds,
                notification,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Notification;

    fn titles_in_display_order(center: &mut NotificationCenter) -> Vec<String> {
        let mut order = Vec::new();
        while let Some(displayed) = center.current() {
            order.push(displayed.notification.title.clone());
            center.dismiss(DismissReason::ManualClose);
        }
        order
    }

    #[test]
    fn new_center_is_idle() {
        let center = NotificationCenter::new();
        assert!(center.is_idle());
        assert!(center.current().is_none());
        assert_eq!(center.pending_len(), 0);
    }

    #[test]
    fn enqueue_on_idle_displays_immediately() {
        let mut center = NotificationCenter::new();
        center.enqueue(Notification::info("first", "b"));

        let displayed = center.current().expect("should display");
        assert_eq!(displayed.notification.title, "first");
        assert_eq!(center.pending_len(), 0);
    }

    #[test]
    fn display_order_is_strict_fifo() {
        let mut center = NotificationCenter::new();
        center.enqueue(Notification::info("e1", "b"));
        center.enqueue(Notification::info("e2", "b"));
        center.enqueue(Notification::info("e3", "b"));

        assert_eq!(center.pending_len(), 2);
        assert_eq!(titles_in_display_order(&mut center), ["e1", "e2", "e3"]);
        assert!(center.is_idle());
    }

    #[test]
    fn dismiss_promotes_next_pending() {
        let mut center = NotificationCenter::new();
        center.enqueue(Notification::info("e1", "b"));
        center.enqueue(Notification::info("e2", "b"));

        let dismissed = center.dismiss(DismissReason::ManualClose);
        assert_eq!(dismissed.expect("was displaying").title, "e1");

        let displayed = center.current().expect("next should be promoted");
        assert_eq!(displayed.notification.title, "e2");
        assert_eq!(center.pending_len(), 0);
    }

    #[test]
    fn dismiss_on_idle_returns_none() {
        let mut center = NotificationCenter::new();
        assert!(center.dismiss(DismissReason::ManualClose).is_none());
    }

    #[test]
    fn auto_dismiss_after_duration_elapses() {
        let mut center = NotificationCenter::new();
        center.enqueue(Notification::info("short", "b").with_duration(Duration::from_secs(2)));
        center.enqueue(Notification::info("next", "b"));

        center.tick_second();
        assert_eq!(
            center.current().expect("still displaying").notification.title,
            "short"
        );

        center.tick_second();
        assert_eq!(
            center.current().expect("promoted").notification.title,
            "next"
        );
    }

    #[test]
    fn sticky_notification_never_times_out() {
        let mut center = NotificationCenter::new();
        center.enqueue(Notification::error("sticky", "b").sticky());

        for _ in 0..120 {
            center.tick_second();
        }
        assert_eq!(
            center.current().expect("still displaying").notification.title,
            "sticky"
        );
    }

    #[test]
    fn countdown_floors_at_zero_without_dismissing() {
        let mut center = NotificationCenter::new();
        center.enqueue(
            Notification::warning("ending", "b")
                .with_duration(Duration::from_secs(10))
                .with_countdown(2),
        );

        for _ in 0..5 {
            center.tick_second();
        }

        let displayed = center.current().expect("countdown end must not dismiss");
        assert_eq!(displayed.countdown, Some(0));
    }

    #[test]
    fn remove_by_id_deletes_pending_without_touching_current() {
        let mut center = NotificationCenter::new();
        center.enqueue(Notification::info("current", "b"));
        let pending = Notification::info("pending", "b");
        let pending_id = pending.id.clone();
        center.enqueue(pending);

        assert!(center.remove_by_id(&pending_id));
        assert_eq!(
            center.current().expect("unchanged").notification.title,
            "current"
        );
        assert_eq!(center.pending_len(), 0);
    }

    #[test]
    fn remove_by_id_on_current_dismisses_and_promotes() {
        let mut center = NotificationCenter::new();
        let current = Notification::info("current", "b");
        let current_id = current.id.clone();
        center.enqueue(current);
        center.enqueue(Notification::info("pending", "b"));

        assert!(center.remove_by_id(&current_id));
        assert_eq!(
            center.current().expect("promoted").notification.title,
            "pending"
        );
    }

    #[test]
    fn remove_by_id_unknown_returns_false() {
        let mut center = NotificationCenter::new();
        center.enqueue(Notification::info("current", "b"));
        let unknown = Notification::info("other", "b").id;

        assert!(!center.remove_by_id(&unknown));
        assert!(center.current().is_some());
    }

    #[test]
    fn clear_all_returns_to_idle() {
        let mut center = NotificationCenter::new();
        for i in 0..4 {
            center.enqueue(Notification::info(format!("n{i}"), "b"));
        }

        center.clear_all();
        assert!(center.is_idle());
    }
}
