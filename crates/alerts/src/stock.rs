//! Cafeteria low-stock monitor.
//!
//! Polls the API every 60 seconds for items at or below the configured
//! threshold. The first load is announced as one batch banner; after
//! that, each item id gets one banner the first time it appears.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use xstation_core::locale::{self, Locale};
use xstation_core::types::DbId;
use xstation_core::StockItem;
use xstation_notify::{Notification, NotificationService, Severity};

use crate::config::AlertsConfig;
use crate::novelty::NoveltyTracker;
use crate::source::StockAlertSource;

/// Stock banners use the standard transient duration.
const BANNER_DURATION: Duration = Duration::from_secs(8);

/// Polls for low-stock cafeteria items.
///
/// Unlike the booking monitor there is no local mutation between polls:
/// each response replaces the item set wholesale.
pub struct StockMonitor<S> {
    source: Arc<S>,
    notifier: Arc<NotificationService>,
    tracker: NoveltyTracker,
    items: Vec<StockItem>,
    items_tx: watch::Sender<Vec<StockItem>>,
    session: watch::Receiver<bool>,
    poll_interval: Duration,
    threshold: u32,
    locale: Locale,
}

impl<S: StockAlertSource> StockMonitor<S> {
    /// Create a monitor. `session` gates polling as in the booking
    /// monitor.
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
            items: Vec::new(),
            items_tx,
            session,
            poll_interval: config.stock_poll_interval,
            threshold: config.low_stock_threshold,
            locale: config.locale,
        }
    }

    /// Subscribe to the current low-stock item list.
    pub fn subscribe_items(&self) -> watch::Receiver<Vec<StockItem>> {
        self.items_tx.subscribe()
    }

    /// Run the poll loop until `cancel` is triggered.
    pub async fn run(mut self, cancel: CancellationToken) {
        let mut poll = tokio::time::interval(self.poll_interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("Stock monitor stopping");
                    break;
                }
                _ = poll.tick() => self.poll_once().await,
            }
        }
    }

    /// Execute one poll tick.
    async fn poll_once(&mut self) {
        if !*self.session.borrow() {
            tracing::debug!("Stock poll skipped: no active session");
            return;
        }

        match self.source.low_stock(self.threshold).await {
            Ok(items) => self.apply_poll(items),
            Err(e) => {
                tracing::warn!(error = %e, "Stock poll failed");
            }
        }
    }

    /// Replace the item set with a poll response and announce novelty.
    fn apply_poll(&mut self, items: Vec<StockItem>) {
        let ids: Vec<DbId> = items.iter().map(|i| i.id).collect();
        let novelty = self.tracker.observe(&ids);

        self.items = items;
        self.items_tx.send_replace(self.items.clone());

        if novelty.is_empty() {
            return;
        }

        if novelty.first_tick {
            // Initial load: one banner covering the whole batch.
            self.notifier
                .enqueue(batch_notification(&self.items, self.locale));
            return;
        }

        for item in self.items.iter().filter(|i| novelty.new_ids.contains(&i.id)) {
            self.notifier.enqueue(item_notification(item, self.locale));
        }
    }
}

/// One banner summarizing the initial low-stock set.
fn batch_notification(items: &[StockItem], locale: Locale) -> Notification {
    let low = items.len() as u64;
    let out = items.iter().filter(|i| i.is_out_of_stock()).count() as u64;

    let low_count = locale::format_count(low, locale);
    let out_count = locale::format_count(out, locale);

    let (title, body) = match locale {
        Locale::En => {
            let body = if out > 0 {
                format!("{low_count} items low on stock, {out_count} out of stock")
            } else {
                format!("{low_count} items low on stock")
            };
            ("Cafeteria stock alert".to_string(), body)
        }
        Locale::Ar => {
            let body = if out > 0 {
                format!("{low_count} أصناف منخفضة المخزون، {out_count} نفدت")
            } else {
                format!("{low_count} أصناف منخفضة المخزون")
            };
            ("تنبيه مخزون الكافيتريا".to_string(), body)
        }
    };

    let severity = if out > 0 {
        Severity::Error
    } else {
        Severity::Warning
    };

    Notification::new(severity, title, body).with_duration(BANNER_DURATION)
}

/// One banner for a single newly low item.
fn item_notification(item: &StockItem, locale: Locale) -> Notification {
    let stock = locale::format_count(item.stock as u64, locale);

    let (title, body) = match locale {
        Locale::En => {
            let body = if item.is_out_of_stock() {
                format!("{} is out of stock", item.name)
            } else {
                format!("{} — {stock} left", item.name)
            };
            ("Cafeteria stock alert".to_string(), body)
        }
        Locale::Ar => {
            let body = if item.is_out_of_stock() {
                format!("{} نفد من المخزون", item.name)
            } else {
                format!("{} — تبقى {stock}", item.name)
            };
            ("تنبيه مخزون الكافيتريا".to_string(), body)
        }
    };

    let severity = if item.is_out_of_stock() {
        Severity::Error
    } else {
        Severity::Warning
    };

    Notification::new(severity, title, body).with_duration(BANNER_DURATION)
}
