//! Notification types pushed over WebSocket connections.
//!
//! The wire shape is part of the external contract: subscribers receive
//! each event as a single JSON text frame with exactly the fields below,
//! no envelope.

use serde::{Deserialize, Serialize};

/// Event pushed to every connected subscriber when an order is created.
///
/// Constructed once per order creation and consumed by exactly one
/// broadcast pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderNotification {
    /// Identifier of the newly created order
    #[serde(rename = "orderID")]
    pub order_id: String,
    /// Stock code of the ordered item
    #[serde(rename = "itemCode")]
    pub item_code: String,
    /// Human-readable item description
    pub item: String,
    /// Number of units ordered
    pub quantity: u32,
}
