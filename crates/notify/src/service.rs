//! Async shell around the notification center.
//!
//! [`NotificationService`] owns the one-second display timer and the
//! outbound rendering interface: a `tokio::sync::watch` channel carrying
//! the notification a renderer should currently show. Producers (the
//! alert monitors) and the renderer both hold the service behind an
//! `Arc` and go through its methods; nothing mutates the center
//! directly.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::center::{DismissReason, Displayed, NotificationCenter};
use crate::event::{Notification, NotificationId, Severity};

/// Cadence of the display timer (auto-dismiss clock and live countdown).
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Renderer-facing snapshot of the current notification.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedView {
    /// Id, for dismiss callbacks from the renderer.
    pub id: NotificationId,
    /// Banner headline.
    pub title: String,
    /// Banner body text.
    pub body: String,
    /// Banner severity.
    pub severity: Severity,
    /// Live countdown value, if the notification carries one.
    pub countdown: Option<u32>,
}

impl From<&Displayed> for DisplayedView {
    fn from(displayed: &Displayed) -> Self {
        Self {
            id: displayed.notification.id.clone(),
            title: displayed.notification.title.clone(),
            body: displayed.notification.body.clone(),
            severity: displayed.notification.severity,
            countdown: displayed.countdown,
        }
    }
}

/// Drives the [`NotificationCenter`] and publishes its display slot.
pub struct NotificationService {
    center: Mutex<NotificationCenter>,
    display_tx: watch::Sender<Option<DisplayedView>>,
    muted: AtomicBool,
}

impl NotificationService {
    /// Create an idle service with an empty center.
    pub fn new() -> Self {
        let (display_tx, _) = watch::channel(None);
        Self {
            center: Mutex::new(NotificationCenter::new()),
            display_tx,
            muted: AtomicBool::new(false),
        }
    }

    /// Subscribe to the current-notification feed.
    ///
    /// The receiver yields `None` while the center is idle, and a fresh
    /// [`DisplayedView`] whenever the display slot or its countdown
    /// changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<DisplayedView>> {
        self.display_tx.subscribe()
    }

    /// Queue a notification for display.
    ///
    /// Dropped silently (at debug level) while the service is muted.
    pub fn enqueue(&self, notification: Notification) {
        if self.is_muted() {
            tracing::debug!(id = %notification.id, "Notification dropped: service muted");
            return;
        }
        let mut center = self.lock_center();
        center.enqueue(notification);
        self.publish(&center);
    }

    /// Dismiss the current notification, promoting the next in line.
    pub fn dismiss(&self, reason: DismissReason) -> Option<Notification> {
        let mut center = self.lock_center();
        let dismissed = center.dismiss(reason);
        self.publish(&center);
        dismissed
    }

    /// Remove a pending notification, or dismiss the current one, by id.
    pub fn remove_by_id(&self, id: &NotificationId) -> bool {
        let mut center = self.lock_center();
        let removed = center.remove_by_id(id);
        if removed {
            self.publish(&center);
        }
        removed
    }

    /// Drop every pending and displayed notification.
    pub fn clear_all(&self) {
        let mut center = self.lock_center();
        center.clear_all();
        self.publish(&center);
    }

    /// Toggle the mute flag. Muting affects future enqueues only; anything
    /// already queued or displayed continues its lifecycle.
    pub fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::Relaxed);
    }

    /// Whether new notifications are currently being dropped.
    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }

    /// Number of notifications waiting behind the current one.
    pub fn pending_len(&self) -> usize {
        self.lock_center().pending_len()
    }

    /// Run the display timer until `cancel` is triggered.
    ///
    /// Ticks the center once per second; no tick runs after this
    /// returns.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(TICK_INTERVAL);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("Notification service stopping");
                    break;
                }
                _ = interval.tick() => {
                    let mut center = self.lock_center();
                    center.tick_second();
                    self.publish(&center);
                }
            }
        }
    }

    /// Push the current display slot to all subscribed renderers.
    fn publish(&self, center: &NotificationCenter) {
        let view = center.current().map(DisplayedView::from);
        self.display_tx.send_if_modified(|slot| {
            if *slot == view {
                false
            } else {
                *slot = view;
                true
            }
        });
    }

    fn lock_center(&self) -> MutexGuard<'_, NotificationCenter> {
        // The center never panics while locked; recover from a poisoned
        // lock rather than propagating the panic to unrelated tasks.
        self.center.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}
