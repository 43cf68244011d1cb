//! Feedback Model
//!
//! Immutable once stored, except for the asynchronous sentiment backfill.

use super::serde_helpers;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Sentiment classification for a feedback comment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SentimentType {
    Positive,
    Negative,
    Neutral,
}

/// Feedback entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RecordId,
    /// Order this feedback concerns, if any
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub order: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    /// 1..=5 when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Backfilled by the classifier, absent until then
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentType>,
    /// -1.00 ..= 1.00
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment_score: Option<Decimal>,
    #[serde(default)]
    pub is_anonymous: bool,
    pub created_at: DateTime<Utc>,
}

/// Create feedback payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RecordId,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub order: Option<RecordId>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub rating: Option<u8>,
    pub comment: Option<String>,
    #[serde(default)]
    pub is_anonymous: bool,
}
