//! Session validation and token lifecycle
//!
//! A token is `active` or `inactive`, and the edge is one-way: regeneration
//! or restaurant deactivation turns it off, and the only way "back" is
//! minting a new token.
//!
//! Concurrent `regenerate` calls for the same table are deliberately not
//! serialized: both may deactivate the current token and both insert a new
//! active one. The brief double-active window is benign — both tokens
//! resolve until the next regeneration — and avoids cross-request locking.

use crate::db::models::{QrCode, QrCodeCreate};
use crate::db::repository::{QrCodeRepository, RepoError, RestaurantRepository};
use serde::Serialize;
use std::sync::Arc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

use super::generator::{CandidateProducer, MAX_GENERATION_ATTEMPTS, TokenGenerator};

/// Session errors.
///
/// `NotFound` and `Inactive` are distinguished internally (logs, tests) but
/// must be collapsed into one generic "invalid session" outcome at the API
/// boundary so callers cannot probe which tokens exist.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Token not found")]
    NotFound,

    #[error("Token or restaurant inactive")]
    Inactive,

    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(String),

    #[error("An active code already exists for table '{0}'")]
    AlreadyIssued(String),

    #[error("Token generation exhausted after {attempts} attempts")]
    GenerationExhausted { attempts: u32 },

    #[error(transparent)]
    Repo(#[from] RepoError),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// The (restaurant, table) pair resolved from a valid token
#[derive(Debug, Clone, Serialize)]
pub struct SessionContext {
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub table_label: String,
    /// Menu URL encoded into the scannable graphic (rendering is external)
    pub menu_url: String,
}

/// Token issuance, regeneration and resolution
#[derive(Clone)]
pub struct SessionValidator {
    codes: QrCodeRepository,
    restaurants: RestaurantRepository,
    generator: Arc<dyn CandidateProducer>,
    qr_base_url: String,
}

impl SessionValidator {
    pub fn new(db: Surreal<Db>, qr_base_url: impl Into<String>) -> Self {
        Self::with_generator(db, qr_base_url, Arc::new(TokenGenerator::new()))
    }

    /// Construct with a specific candidate producer (tests substitute
    /// deterministic ones)
    pub fn with_generator(
        db: Surreal<Db>,
        qr_base_url: impl Into<String>,
        generator: Arc<dyn CandidateProducer>,
    ) -> Self {
        Self {
            codes: QrCodeRepository::new(db.clone()),
            restaurants: RestaurantRepository::new(db),
            generator,
            qr_base_url: qr_base_url.into(),
        }
    }

    /// Resolve a presented token to its session context.
    ///
    /// Valid iff the token exists, is active, and its restaurant is active.
    pub async fn resolve(&self, code: &str) -> SessionResult<SessionContext> {
        let qr = self
            .codes
            .find_by_code(code)
            .await?
            .ok_or(SessionError::NotFound)?;

        if !qr.is_active {
            return Err(SessionError::Inactive);
        }

        let restaurant = self
            .restaurants
            .find_by_id(&qr.restaurant)
            .await?
            .ok_or(SessionError::Inactive)?;
        if !restaurant.is_active {
            return Err(SessionError::Inactive);
        }

        Ok(SessionContext {
            restaurant_id: qr.restaurant.to_string(),
            restaurant_name: restaurant.name,
            menu_url: self.menu_url(&qr.restaurant, &qr.table_label),
            table_label: qr.table_label,
        })
    }

    /// Issue the first token for a (restaurant, table) pair.
    ///
    /// Rejects when an active token already exists — superseding one goes
    /// through [`Self::regenerate`] so the one-active-per-table invariant
    /// holds.
    pub async fn issue(&self, restaurant_id: &RecordId, table_label: &str) -> SessionResult<QrCode> {
        let restaurant = self
            .restaurants
            .find_by_id(restaurant_id)
            .await?
            .ok_or_else(|| SessionError::RestaurantNotFound(restaurant_id.to_string()))?;

        if self
            .codes
            .find_active_for_table(restaurant_id, table_label)
            .await?
            .is_some()
        {
            return Err(SessionError::AlreadyIssued(table_label.to_string()));
        }

        self.mint(&restaurant.name, restaurant_id, table_label).await
    }

    /// Supersede the current token for a table: deactivate it, mint a new one.
    ///
    /// Not atomic across concurrent calls by design (see module docs); the
    /// last writer wins once the new graphic is printed.
    pub async fn regenerate(
        &self,
        restaurant_id: &RecordId,
        table_label: &str,
    ) -> SessionResult<QrCode> {
        let restaurant = self
            .restaurants
            .find_by_id(restaurant_id)
            .await?
            .ok_or_else(|| SessionError::RestaurantNotFound(restaurant_id.to_string()))?;

        self.codes
            .deactivate_for_table(restaurant_id, table_label)
            .await?;

        let qr = self.mint(&restaurant.name, restaurant_id, table_label).await?;
        tracing::info!(
            restaurant = %restaurant_id,
            table = table_label,
            "QR code regenerated"
        );
        Ok(qr)
    }

    /// Manually deactivate one token (one-way)
    pub async fn deactivate(&self, code_id: &str) -> SessionResult<QrCode> {
        Ok(self.codes.deactivate(code_id).await?)
    }

    /// List a restaurant's tokens
    pub async fn list(
        &self,
        restaurant_id: &RecordId,
        active_only: bool,
    ) -> SessionResult<Vec<QrCode>> {
        Ok(self
            .codes
            .find_by_restaurant(restaurant_id, active_only)
            .await?)
    }

    /// Mint and persist a fresh active token.
    ///
    /// The existence pre-check is an optimization; the unique index is the
    /// real guard. A duplicate insert counts as a collision and retries with
    /// a fresh candidate, bounded by [`MAX_GENERATION_ATTEMPTS`].
    async fn mint(
        &self,
        restaurant_name: &str,
        restaurant_id: &RecordId,
        table_label: &str,
    ) -> SessionResult<QrCode> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let code = self.generator.candidate(restaurant_name, table_label);

            if self.codes.exists_by_code(&code).await? {
                tracing::warn!(attempt, "QR code candidate collision on pre-check");
                continue;
            }

            match self
                .codes
                .create(QrCodeCreate {
                    code,
                    restaurant: restaurant_id.clone(),
                    table_label: table_label.to_string(),
                })
                .await
            {
                Ok(qr) => return Ok(qr),
                Err(RepoError::Duplicate(msg)) => {
                    // Lost the insert race on the unique index
                    tracing::warn!(attempt, error = %msg, "QR code candidate collision on insert");
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }

        // Operational anomaly: entropy should make this unreachable
        tracing::error!(
            restaurant = %restaurant_id,
            table = table_label,
            attempts = MAX_GENERATION_ATTEMPTS,
            "Token generation exhausted"
        );
        Err(SessionError::GenerationExhausted {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }

    fn menu_url(&self, restaurant_id: &RecordId, table_label: &str) -> String {
        format!(
            "{}/{}?table={}",
            self.qr_base_url,
            restaurant_id.key(),
            table_label
        )
    }
}
