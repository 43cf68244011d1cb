//! Sentiment classification collaborator
//!
//! Classification is best-effort and never blocks feedback submission: the
//! linker stores the record first and backfills sentiment afterwards.
//! [`SentimentClassifier`] is the seam for swapping in a remote service; the
//! default is a small keyword scorer.

use crate::db::models::SentimentType;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Classifier verdict: label plus a score in [-1.00, 1.00]
#[derive(Debug, Clone, Copy)]
pub struct SentimentVerdict {
    pub label: SentimentType,
    pub score: Decimal,
}

/// External collaborator interface
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Classify a comment. `None` means the classifier abstains.
    async fn classify(&self, text: &str) -> Option<SentimentVerdict>;
}

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "amazing", "delicious", "tasty", "friendly", "fast", "love",
    "loved", "perfect", "wonderful", "fresh", "best",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "cold", "slow", "rude", "bland", "stale", "hate", "hated",
    "worst", "dirty", "disappointing", "overpriced",
];

/// Keyword-based default classifier
#[derive(Debug, Clone, Default)]
pub struct KeywordClassifier;

#[async_trait]
impl SentimentClassifier for KeywordClassifier {
    async fn classify(&self, text: &str) -> Option<SentimentVerdict> {
        let mut positive = 0i64;
        let mut negative = 0i64;

        for word in text.split(|c: char| !c.is_alphanumeric()) {
            if word.is_empty() {
                continue;
            }
            let lower = word.to_lowercase();
            if POSITIVE_WORDS.contains(&lower.as_str()) {
                positive += 1;
            } else if NEGATIVE_WORDS.contains(&lower.as_str()) {
                negative += 1;
            }
        }

        let total = positive + negative;
        if total == 0 {
            return Some(SentimentVerdict {
                label: SentimentType::Neutral,
                score: Decimal::ZERO,
            });
        }

        // (pos - neg) / (pos + neg), two decimals
        let score = (Decimal::from(positive - negative) / Decimal::from(total)).round_dp(2);
        let label = if score > Decimal::ZERO {
            SentimentType::Positive
        } else if score < Decimal::ZERO {
            SentimentType::Negative
        } else {
            SentimentType::Neutral
        };

        Some(SentimentVerdict { label, score })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn positive_comment() {
        let verdict = KeywordClassifier
            .classify("The food was delicious and the staff friendly")
            .await
            .unwrap();
        assert_eq!(verdict.label, SentimentType::Positive);
        assert!(verdict.score > Decimal::ZERO);
    }

    #[tokio::test]
    async fn negative_comment() {
        let verdict = KeywordClassifier
            .classify("Cold food, slow and rude service")
            .await
            .unwrap();
        assert_eq!(verdict.label, SentimentType::Negative);
        assert!(verdict.score < Decimal::ZERO);
    }

    #[tokio::test]
    async fn neutral_when_no_keywords() {
        let verdict = KeywordClassifier
            .classify("We came on a Tuesday around noon")
            .await
            .unwrap();
        assert_eq!(verdict.label, SentimentType::Neutral);
        assert_eq!(verdict.score, Decimal::ZERO);
    }

    #[tokio::test]
    async fn mixed_comment_balances_out() {
        let verdict = KeywordClassifier
            .classify("great starter but terrible dessert")
            .await
            .unwrap();
        assert_eq!(verdict.label, SentimentType::Neutral);
    }
}
