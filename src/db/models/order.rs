//! Order Model
//!
//! Lines are embedded in the order document so the price snapshot, the lines
//! and the total are written in one atomic create. Lines are immutable after
//! submission — amendments are a new order.
//!
//! `version` is the optimistic concurrency counter: every status transition
//! is a conditional update on (status, version). See
//! [`crate::db::repository::OrderRepository::transition_cas`].

use super::serde_helpers;
use crate::orders::OrderStatus;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// One menu item entry within an order, with frozen quantity and unit price
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    /// Menu item this line snapshots
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item: RecordId,
    /// Item name at order time
    pub name: String,
    /// Quantity, always >= 1
    pub quantity: u32,
    /// Unit price captured at order time, never re-read from the live item
    pub unit_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

impl OrderLine {
    /// quantity × unit_price
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Owning restaurant
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RecordId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    pub status: OrderStatus,
    /// Always equals the sum of line totals
    pub total_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    pub lines: Vec<OrderLine>,
    /// Optimistic concurrency counter
    #[serde(default)]
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Sum of quantity × unit_price over all lines
    pub fn lines_total(&self) -> Decimal {
        self.lines.iter().map(OrderLine::line_total).sum()
    }
}
