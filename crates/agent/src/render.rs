//! Log renderer for the notification feed.
//!
//! Stand-in for the dashboard's banner component: watches the current
//! notification and logs it. A new banner is logged at info; per-second
//! countdown refreshes of the same banner stay at debug.

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use xstation_notify::{DisplayedView, NotificationId};

/// Mirror the notification feed into the log until `cancel` fires or the
/// service side of the channel is dropped.
pub async fn run(mut rx: watch::Receiver<Option<DisplayedView>>, cancel: CancellationToken) {
    let mut shown: Option<NotificationId> = None;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    // Notification service dropped.
                    break;
                }
                let view = rx.borrow_and_update().clone();
                match view {
                    Some(view) if shown.as_ref() != Some(&view.id) => {
                        tracing::info!(
                            id = %view.id,
                            severity = ?view.severity,
                            countdown = view.countdown,
                            "{}: {}",
                            view.title,
                            view.body,
                        );
                        shown = Some(view.id);
                    }
                    Some(view) => {
                        tracing::debug!(id = %view.id, countdown = view.countdown, "Banner refresh");
                    }
                    None => {
                        if shown.take().is_some() {
                            tracing::debug!("Banner cleared");
                        }
                    }
                }
            }
        }
    }
}
