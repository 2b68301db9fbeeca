//! Alert item types produced by the X-Station API pollers.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// A booking whose end time is within the server's "ending soon" window.
///
/// Decoded from one element of the `GET /bookings/ending-soon` response.
/// After a successful poll the monitor keeps a local copy and decrements
/// [`total_remaining_seconds`](Self::total_remaining_seconds) once per
/// second; the item is pruned when it reaches zero or disappears from a
/// later poll (booking ended, extended, or no longer imminent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingAlert {
    /// Booking row id.
    pub id: DbId,
    /// Room the booking occupies.
    pub room_id: DbId,
    /// Display name of the room.
    pub room_name: String,
    /// Customer name, if the booking has one attached.
    #[serde(default)]
    pub customer_name: Option<String>,
    /// Seconds until the booking ends, as reported by the server.
    pub total_remaining_seconds: u32,
}

impl BookingAlert {
    /// Apply one second of local countdown, saturating at zero.
    ///
    /// Returns `true` while the booking still has time remaining.
    pub fn tick_second(&mut self) -> bool {
        self.total_remaining_seconds = self.total_remaining_seconds.saturating_sub(1);
        self.total_remaining_seconds > 0
    }
}

/// A cafeteria item at or below the low-stock threshold.
///
/// Unlike [`BookingAlert`], stock items carry no local state: each poll
/// response replaces the whole set, and an item drops out once its stock
/// rises above the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    /// Item row id.
    pub id: DbId,
    /// Display name of the item.
    pub name: String,
    /// Units currently in stock.
    pub stock: u32,
    /// Unit price.
    pub price: f64,
}

impl StockItem {
    /// Whether the item is completely sold out.
    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }
}
