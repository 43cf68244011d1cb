//! FeedbackLinker - attach feedback to orders
//!
//! Feedback is immutable once stored; the only later write is the sentiment
//! backfill, which runs in a spawned task so submission never waits on the
//! classifier.

use crate::db::models::{Feedback, FeedbackCreate};
use crate::db::repository::{FeedbackRepository, OrderRepository, RepoError};
use crate::feedback::sentiment::SentimentClassifier;
use std::sync::Arc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Feedback errors
#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    /// Also covers an order belonging to another restaurant: a caller
    /// probing foreign orders learns nothing beyond "not found".
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

pub type FeedbackResult<T> = Result<T, FeedbackError>;

/// Feedback submission input
#[derive(Debug, Clone, Default)]
pub struct AttachFeedback {
    /// "orders:xxx", optional — feedback may be standalone
    pub order_id: Option<String>,
    pub rating: Option<u8>,
    pub comment: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub is_anonymous: bool,
}

/// Feedback service
#[derive(Clone)]
pub struct FeedbackLinker {
    feedback: FeedbackRepository,
    orders: OrderRepository,
    classifier: Arc<dyn SentimentClassifier>,
}

impl FeedbackLinker {
    pub fn new(db: Surreal<Db>, classifier: Arc<dyn SentimentClassifier>) -> Self {
        Self {
            feedback: FeedbackRepository::new(db.clone()),
            orders: OrderRepository::new(db),
            classifier,
        }
    }

    /// Attach feedback to an order (or store it standalone).
    ///
    /// The record is readable immediately with `sentiment` absent; the
    /// classifier backfills it asynchronously.
    pub async fn attach(
        &self,
        restaurant: &RecordId,
        input: AttachFeedback,
    ) -> FeedbackResult<Feedback> {
        if let Some(rating) = input.rating
            && !(1..=5).contains(&rating)
        {
            return Err(FeedbackError::InvalidRating(rating));
        }

        let order = match &input.order_id {
            Some(order_id) => {
                let order = self
                    .orders
                    .find_by_id(order_id)
                    .await?
                    .filter(|o| &o.restaurant == restaurant)
                    .ok_or_else(|| FeedbackError::OrderNotFound(order_id.clone()))?;
                order.id
            }
            None => None,
        };

        let created = self
            .feedback
            .create(FeedbackCreate {
                restaurant: restaurant.clone(),
                order,
                customer_name: input.customer_name,
                customer_email: input.customer_email,
                rating: input.rating,
                comment: input.comment,
                is_anonymous: input.is_anonymous,
            })
            .await?;

        if created.comment.is_some() {
            self.spawn_sentiment_backfill(created.clone());
        }

        Ok(created)
    }

    /// Read one feedback record
    pub async fn get(&self, id: &str) -> FeedbackResult<Option<Feedback>> {
        Ok(self.feedback.find_by_id(id).await?)
    }

    /// All feedback of a restaurant
    pub async fn list(&self, restaurant: &RecordId) -> FeedbackResult<Vec<Feedback>> {
        Ok(self.feedback.find_by_restaurant(restaurant).await?)
    }

    /// Best-effort: classification failures are logged, never surfaced to
    /// the submitting diner.
    fn spawn_sentiment_backfill(&self, feedback: Feedback) {
        let (Some(id), Some(comment)) = (feedback.id, feedback.comment) else {
            return;
        };
        let classifier = self.classifier.clone();
        let repo = self.feedback.clone();

        tokio::spawn(async move {
            let Some(verdict) = classifier.classify(&comment).await else {
                return;
            };
            if let Err(e) = repo.set_sentiment(&id, verdict.label, verdict.score).await {
                tracing::warn!(feedback = %id, error = %e, "Sentiment backfill failed");
            }
        });
    }
}
