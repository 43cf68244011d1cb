//! QR Code Repository
//!
//! The `code` column carries a unique index (see [`crate::db`]). A duplicate
//! insert is reported as [`RepoError::Duplicate`] and treated by callers as a
//! generation collision, not a failure.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{QrCode, QrCodeCreate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "qr_code";

#[derive(Clone)]
pub struct QrCodeRepository {
    base: BaseRepository,
}

impl QrCodeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<QrCode>> {
        let thing: RecordId = self.base.parse_id(id)?;
        let code: Option<QrCode> = self.base.db().select(thing).await?;
        Ok(code)
    }

    /// Find by token string
    pub async fn find_by_code(&self, code: &str) -> RepoResult<Option<QrCode>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM qr_code WHERE code = $code LIMIT 1")
            .bind(("code", code.to_string()))
            .await?;
        let codes: Vec<QrCode> = result.take(0)?;
        Ok(codes.into_iter().next())
    }

    /// Pre-insert existence check. An optimization only — the unique index
    /// remains the authoritative guarantee.
    pub async fn exists_by_code(&self, code: &str) -> RepoResult<bool> {
        Ok(self.find_by_code(code).await?.is_some())
    }

    /// Current active token for a (restaurant, table) pair
    pub async fn find_active_for_table(
        &self,
        restaurant: &RecordId,
        table_label: &str,
    ) -> RepoResult<Option<QrCode>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM qr_code \
                 WHERE restaurant = $restaurant AND table_label = $table_label AND is_active = true \
                 LIMIT 1",
            )
            .bind(("restaurant", restaurant.clone()))
            .bind(("table_label", table_label.to_string()))
            .await?;
        let codes: Vec<QrCode> = result.take(0)?;
        Ok(codes.into_iter().next())
    }

    /// All tokens of a restaurant, newest first
    pub async fn find_by_restaurant(
        &self,
        restaurant: &RecordId,
        active_only: bool,
    ) -> RepoResult<Vec<QrCode>> {
        let query = if active_only {
            "SELECT * FROM qr_code WHERE restaurant = $restaurant AND is_active = true ORDER BY created_at DESC"
        } else {
            "SELECT * FROM qr_code WHERE restaurant = $restaurant ORDER BY created_at DESC"
        };
        let codes: Vec<QrCode> = self
            .base
            .db()
            .query(query)
            .bind(("restaurant", restaurant.clone()))
            .await?
            .take(0)?;
        Ok(codes)
    }

    /// Insert a new active token. Duplicate code → [`RepoError::Duplicate`].
    pub async fn create(&self, data: QrCodeCreate) -> RepoResult<QrCode> {
        // Native RecordId keeps `restaurant` a record link in storage
        #[derive(serde::Serialize)]
        struct InternalQrCode {
            code: String,
            restaurant: RecordId,
            table_label: String,
            is_active: bool,
            created_at: chrono::DateTime<chrono::Utc>,
        }

        let qr = InternalQrCode {
            code: data.code,
            restaurant: data.restaurant,
            table_label: data.table_label,
            is_active: true,
            created_at: chrono::Utc::now(),
        };
        let created: Option<QrCode> = self.base.db().create(TABLE).content(qr).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create QR code".to_string()))
    }

    /// Deactivate whatever token is currently active for the pair.
    /// Not an error when nothing is active (idempotent).
    pub async fn deactivate_for_table(
        &self,
        restaurant: &RecordId,
        table_label: &str,
    ) -> RepoResult<()> {
        self.base
            .db()
            .query(
                "UPDATE qr_code SET is_active = false \
                 WHERE restaurant = $restaurant AND table_label = $table_label AND is_active = true",
            )
            .bind(("restaurant", restaurant.clone()))
            .bind(("table_label", table_label.to_string()))
            .await?;
        Ok(())
    }

    /// One-way manual deactivation. Reactivation is minting a new token.
    pub async fn deactivate(&self, id: &str) -> RepoResult<QrCode> {
        let thing: RecordId = self.base.parse_id(id)?;
        self.base
            .db()
            .query("UPDATE $thing SET is_active = false")
            .bind(("thing", thing))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("QR code {} not found", id)))
    }
}
