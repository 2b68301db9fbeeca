//! Alert data sources.
//!
//! The monitors are written against the [`BookingAlertSource`] and
//! [`StockAlertSource`] traits so tests can drive them with scripted
//! in-memory sources. [`XStationApi`] is the production implementation
//! over the X-Station HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use xstation_core::{BookingAlert, StockItem};

/// HTTP request timeout for a single poll.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A failed poll tick.
///
/// Both variants are soft failures: the monitor logs them and keeps its
/// previous state until the next scheduled tick.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("X-Station API returned HTTP {0}")]
    HttpStatus(u16),
}

/// Source of bookings inside the server's "ending soon" window.
#[async_trait]
pub trait BookingAlertSource: Send + Sync {
    /// Fetch the bookings currently ending soon.
    async fn ending_soon(&self) -> Result<Vec<BookingAlert>, SourceError>;
}

/// Source of cafeteria items at or below a stock threshold.
#[async_trait]
pub trait StockAlertSource: Send + Sync {
    /// Fetch the items whose stock is at or below `threshold`.
    async fn low_stock(&self, threshold: u32) -> Result<Vec<StockItem>, SourceError>;
}

/// HTTP client for the X-Station API alert endpoints.
pub struct XStationApi {
    client: reqwest::Client,
    base_url: String,
}

impl XStationApi {
    /// Create a client for the API at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// GET `url` and decode a JSON list.
    ///
    /// A non-2xx status is a [`SourceError`]. A 2xx body that fails to
    /// decode is treated as zero items this tick — the original dashboard
    /// falls back to an empty list, which correctly clears the alert
    /// badge instead of wedging it on stale data.
    async fn fetch_list<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, SourceError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await?;
        match serde_json::from_str(&body) {
            Ok(items) => Ok(items),
            Err(e) => {
                tracing::warn!(url, error = %e, "Undecodable alert response, treating as empty");
                Ok(Vec::new())
            }
        }
    }
}

#[async_trait]
impl BookingAlertSource for XStationApi {
    async fn ending_soon(&self) -> Result<Vec<BookingAlert>, SourceError> {
        let url = format!("{}/bookings/ending-soon", self.base_url);
        self.fetch_list(&url).await
    }
}

#[async_trait]
impl StockAlertSource for XStationApi {
    async fn low_stock(&self, threshold: u32) -> Result<Vec<StockItem>, SourceError> {
        let url = format!(
            "{}/cafeteria/items/low-stock?threshold={threshold}",
            self.base_url
        );
        self.fetch_list(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_does_not_panic() {
        let _api = XStationApi::new("http://localhost:8000/api");
    }

    #[test]
    fn source_error_display_http_status() {
        let err = SourceError::HttpStatus(503);
        assert_eq!(err.to_string(), "X-Station API returned HTTP 503");
    }

    #[test]
    fn source_error_display_request() {
        // Build a reqwest error from an invalid URL.
        let req_err = reqwest::Client::new().get("://bad").build().unwrap_err();
        let err = SourceError::Request(req_err);
        assert!(err.to_string().contains("HTTP request failed"));
    }
}
