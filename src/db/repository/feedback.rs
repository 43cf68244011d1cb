//! Feedback Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Feedback, FeedbackCreate, SentimentType};
use rust_decimal::Decimal;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "feedback";

#[derive(Clone)]
pub struct FeedbackRepository {
    base: BaseRepository,
}

impl FeedbackRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find feedback by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Feedback>> {
        let thing: RecordId = self.base.parse_id(id)?;
        let feedback: Option<Feedback> = self.base.db().select(thing).await?;
        Ok(feedback)
    }

    /// All feedback of a restaurant, newest first
    pub async fn find_by_restaurant(&self, restaurant: &RecordId) -> RepoResult<Vec<Feedback>> {
        let feedback: Vec<Feedback> = self
            .base
            .db()
            .query("SELECT * FROM feedback WHERE restaurant = $restaurant ORDER BY created_at DESC")
            .bind(("restaurant", restaurant.clone()))
            .await?
            .take(0)?;
        Ok(feedback)
    }

    /// Create a new feedback record (sentiment absent until backfilled)
    pub async fn create(&self, data: FeedbackCreate) -> RepoResult<Feedback> {
        // Native RecordId so `restaurant` and `order` are stored as links
        #[derive(serde::Serialize)]
        struct InternalFeedback {
            restaurant: RecordId,
            order: Option<RecordId>,
            customer_name: Option<String>,
            customer_email: Option<String>,
            rating: Option<u8>,
            comment: Option<String>,
            is_anonymous: bool,
            created_at: chrono::DateTime<chrono::Utc>,
        }

        let feedback = InternalFeedback {
            restaurant: data.restaurant,
            order: data.order,
            customer_name: data.customer_name,
            customer_email: data.customer_email,
            rating: data.rating,
            comment: data.comment,
            is_anonymous: data.is_anonymous,
            created_at: chrono::Utc::now(),
        };
        let created: Option<Feedback> = self.base.db().create(TABLE).content(feedback).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create feedback".to_string()))
    }

    /// Sentiment backfill — the only permitted mutation of a stored record
    pub async fn set_sentiment(
        &self,
        id: &RecordId,
        sentiment: SentimentType,
        score: Decimal,
    ) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $thing SET sentiment = $sentiment, sentiment_score = $score")
            .bind(("thing", id.clone()))
            .bind(("sentiment", sentiment))
            .bind(("score", score))
            .await?;
        Ok(())
    }
}
