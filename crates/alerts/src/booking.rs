//! Booking "ending soon" monitor.
//!
//! Polls the API every 30 seconds for bookings inside the server-defined
//! ending-soon window, announces newly appearing bookings through the
//! notification service, and runs a local one-second countdown over the
//! active list so the badge/popover feed stays live between polls.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use xstation_core::locale::{self, Locale};
use xstation_core::types::DbId;
use xstation_core::BookingAlert;
use xstation_notify::{Notification, NotificationService};

use crate::config::AlertsConfig;
use crate::novelty::NoveltyTracker;
use crate::source::BookingAlertSource;

/// Booking banners stay up longer than the default so the operator can
/// read the live countdown.
const BANNER_DURATION: Duration = Duration::from_secs(10);

/// Cadence of the local remaining-time countdown.
const COUNTDOWN_INTERVAL: Duration = Duration::from_secs(1);

/// Polls for bookings ending soon and maintains their local countdowns.
///
/// All state (novelty tracker, active list) is owned by the monitor and
/// mutated only inside [`run`](Self::run); consumers observe it through
/// the items watch channel.
pub struct BookingMonitor<S> {
    source: Arc<S>,
    notifier: Arc<NotificationService>,
    tracker: NoveltyTracker,
    active: Vec<BookingAlert>,
    items_tx: watch::Sender<Vec<BookingAlert>>,
    session: watch::Receiver<bool>,
    poll_interval: Duration,
    locale: Locale,
}

impl<S: BookingAlertSource> BookingMonitor<S> {
    /// Create a monitor.
    ///
    /// `session` gates polling: while it holds `false` (operator not
    /// authenticated), poll ticks are skipped without error. The local
    /// countdown keeps running over whatever was already fetched.
    pub fn new(
        source: Arc<S>,
        notifier: Arc<NotificationService>,
        session: watch::Receiver<bool>,
        config: &AlertsConfig,
    ) -> Self {
        let (items_tx, _) = watch::channel(Vec::new());
        Self {
            source,
            notifier,
            tracker: NoveltyTracker::new(),
            active: Vec::new(),
            items_tx,
            session,
            poll_interval: config.booking_poll_interval,
            locale: config.locale,
        }
    }

    /// Subscribe to the active booking list (badge counts, popover).
    pub fn subscribe_items(&self) -> watch::Receiver<Vec<BookingAlert>> {
        self.items_tx.subscribe()
    }

    /// Run the poll and countdown loops until `cancel` is triggered.
    ///
    /// The first poll fires immediately, then every poll interval. No
    /// tick runs after this returns.
    pub async fn run(mut self, cancel: CancellationToken) {
        let mut poll = tokio::time::interval(self.poll_interval);
        let mut countdown = tokio::time::interval(COUNTDOWN_INTERVAL);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("Booking monitor stopping");
                    break;
                }
                _ = poll.tick() => self.poll_once().await,
                _ = countdown.tick() => self.tick_countdowns(),
            }
        }
    }

    /// Execute one poll tick.
    async fn poll_once(&mut self) {
        if !*self.session.borrow() {
            tracing::debug!("Booking poll skipped: no active session");
            return;
        }

        match self.source.ending_soon().await {
            Ok(items) => self.apply_poll(items),
            Err(e) => {
                // Soft failure: keep the previous list, wait for the
                // next scheduled tick.
                tracing::warn!(error = %e, "Booking poll failed");
            }
        }
    }

    /// Replace the active list with a poll response and announce novelty.
    fn apply_poll(&mut self, items: Vec<BookingAlert>) {
        let ids: Vec<DbId> = items.iter().map(|b| b.id).collect();
        let novelty = self.tracker.observe(&ids);

        self.active = items;
        self.items_tx.send_replace(self.active.clone());

        if novelty.is_empty() {
            return;
        }

        if novelty.first_tick {
            // Initial load: the whole window is "new". Announce only the
            // first (closest to ending) booking instead of spamming one
            // banner per booking.
            if let Some(booking) = self.active.first() {
                self.notifier.enqueue(notification_for(booking, self.locale));
            }
            return;
        }

        for booking in self
            .active
            .iter()
            .filter(|b| novelty.new_ids.contains(&b.id))
        {
            self.notifier.enqueue(notification_for(booking, self.locale));
        }
    }

    /// Apply one second of countdown to every active booking.
    ///
    /// Bookings that reach zero are pruned; the remaining list is
    /// republished to the items feed.
    fn tick_countdowns(&mut self) {
        if self.active.is_empty() {
            return;
        }
        self.active.retain_mut(BookingAlert::tick_second);
        self.items_tx.send_replace(self.active.clone());
    }
}

/// Build the banner for one booking, localized.
fn notification_for(booking: &BookingAlert, locale: Locale) -> Notification {
    let remaining = locale::format_remaining(booking.total_remaining_seconds, locale);

    let (title, body) = match locale {
        Locale::En => {
            let body = match &booking.customer_name {
                Some(customer) => {
                    format!(
                        "{} ({customer}) ends in {remaining}",
                        booking.room_name
                    )
                }
                None => format!("{} ends in {remaining}", booking.room_name),
            };
            ("Booking ending soon".to_string(), body)
        }
        Locale::Ar => {
            let body = match &booking.customer_name {
                Some(customer) => {
                    format!("{} ({customer}) ينتهي خلال {remaining}", booking.room_name)
                }
                None => format!("{} ينتهي خلال {remaining}", booking.room_name),
            };
            ("حجز يوشك على الانتهاء".to_string(), body)
        }
    };

    Notification::warning(title, body)
        .with_duration(BANNER_DURATION)
        .with_countdown(booking.total_remaining_seconds)
}
