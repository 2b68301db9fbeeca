//! `xstation-agent` -- headless alert daemon for the X-Station venue API.
//!
//! Polls the booking "ending soon" and cafeteria low-stock endpoints,
//! pushes alerts through the notification pipeline, and renders the
//! current banner to the log.
//!
//! # Environment variables
//!
//! | Variable                     | Required | Default | Description                          |
//! |------------------------------|----------|---------|--------------------------------------|
//! | `XSTATION_API_URL`           | yes      | --      | API base URL, e.g. `http://host/api` |
//! | `BOOKING_POLL_INTERVAL_SECS` | no       | `30`    | Seconds between booking polls        |
//! | `STOCK_POLL_INTERVAL_SECS`   | no       | `60`    | Seconds between stock polls          |
//! | `LOW_STOCK_THRESHOLD`        | no       | `10`    | Low-stock cutoff in units            |
//! | `XSTATION_LOCALE`            | no       | `en`    | Banner locale (`en` or `ar`)         |

mod render;

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use xstation_alerts::{AlertsConfig, BookingMonitor, StockMonitor, XStationApi};
use xstation_notify::NotificationService;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "xstation_agent=info,xstation_alerts=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_url = std::env::var("XSTATION_API_URL").unwrap_or_else(|_| {
        tracing::error!("XSTATION_API_URL environment variable is required");
        std::process::exit(1);
    });

    let config = AlertsConfig::from_env();

    tracing::info!(
        api_url = %api_url,
        booking_interval_secs = config.booking_poll_interval.as_secs(),
        stock_interval_secs = config.stock_poll_interval.as_secs(),
        low_stock_threshold = config.low_stock_threshold,
        locale = ?config.locale,
        "Starting xstation-agent",
    );

    let api = Arc::new(XStationApi::new(api_url));
    let notifier = Arc::new(NotificationService::new());

    // The daemon has no login flow; the session gate that the interactive
    // dashboard toggles stays open for the process lifetime.
    let (_session_tx, session) = watch::channel(true);

    let booking = BookingMonitor::new(
        Arc::clone(&api),
        Arc::clone(&notifier),
        session.clone(),
        &config,
    );
    let stock = StockMonitor::new(api, Arc::clone(&notifier), session, &config);

    let cancel = CancellationToken::new();
    let tasks = vec![
        tokio::spawn(booking.run(cancel.clone())),
        tokio::spawn(stock.run(cancel.clone())),
        tokio::spawn({
            let notifier = Arc::clone(&notifier);
            let cancel = cancel.clone();
            async move { notifier.run(cancel).await }
        }),
        tokio::spawn(render::run(notifier.subscribe(), cancel.clone())),
    ];

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }

    tracing::info!("Shutdown signal received, stopping");
    cancel.cancel();

    for task in tasks {
        let _ = task.await;
    }

    tracing::info!("xstation-agent stopped");
}
