//! QR Code Model
//!
//! An access token binding a physical table to a restaurant. The `code`
//! string is globally unique (enforced by a unique index) and at most one
//! token per (restaurant, table_label) is active at a time — historical
//! inactive tokens are kept, never deleted.

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// QR code entity (access token record)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrCode {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Opaque token string, globally unique
    pub code: String,
    /// Owning restaurant
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RecordId,
    /// Free-form table label ("12", "Terrace 3")
    pub table_label: String,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Create QR code payload (token string comes from the generator)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrCodeCreate {
    pub code: String,
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RecordId,
    pub table_label: String,
}
