//! Token candidate generation
//!
//! A token looks like `LAPIAZZA-12-17251234567893f2a`: a short readable
//! prefix derived from the restaurant name, the table label, and a
//! millisecond timestamp plus random hex tail. The prefix is operator
//! convenience only; uniqueness comes from the suffix entropy and,
//! authoritatively, from the database's unique index on the code column.

use chrono::Utc;
use rand::Rng;

/// Collision retries before a mint attempt is declared exhausted.
/// With the suffix entropy a single collision is already anomalous.
pub const MAX_GENERATION_ATTEMPTS: u32 = 8;

/// Readable prefix length, alphanumeric upper-case
const PREFIX_LEN: usize = 10;

/// Random hex characters appended after the timestamp
const SUFFIX_HEX_LEN: usize = 4;

/// Candidate producer seam.
///
/// Pure: existence checks and persistence are the caller's job
/// ([`super::SessionValidator`]). The default is [`TokenGenerator`];
/// tests substitute deterministic producers to drive the collision path.
pub trait CandidateProducer: Send + Sync {
    /// Build one fresh candidate token for a (restaurant, table) pair
    fn candidate(&self, restaurant_name: &str, table_label: &str) -> String;
}

/// Produces token candidates from the restaurant name, the table label,
/// a millisecond timestamp and a random hex tail.
#[derive(Debug, Clone, Default)]
pub struct TokenGenerator;

impl TokenGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Derive the non-sensitive readable prefix from a restaurant name:
    /// alphanumeric characters only, upper-cased, truncated
    pub fn prefix(restaurant_name: &str) -> String {
        restaurant_name
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_uppercase())
            .take(PREFIX_LEN)
            .collect()
    }
}

impl CandidateProducer for TokenGenerator {
    fn candidate(&self, restaurant_name: &str, table_label: &str) -> String {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..SUFFIX_HEX_LEN)
            .map(|_| format!("{:x}", rng.gen_range(0..16u8)))
            .collect();
        format!(
            "{}-{}-{}{}",
            Self::prefix(restaurant_name),
            table_label,
            Utc::now().timestamp_millis(),
            suffix
        )
    }
}
