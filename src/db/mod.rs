//! Database Module
//!
//! Embedded SurrealDB connection and schema definition.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "menux";
const DATABASE: &str = "menux";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the on-disk database at the given path and apply the schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {e}")))?;
        Self::initialize(db).await
    }

    /// Open an in-memory database (tests and local experiments)
    pub async fn new_in_memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::Database(format!("Failed to open in-memory database: {e}")))?;
        Self::initialize(db).await
    }

    async fn initialize(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::Database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;
        tracing::info!("Database connection established (SurrealDB embedded)");

        Ok(Self { db })
    }
}

/// Apply the schema. All statements are idempotent (`IF NOT EXISTS`),
/// safe to run on every startup.
///
/// The unique index on `qr_code.code` is the authoritative uniqueness
/// guarantee for access tokens; the generator's existence pre-check is
/// only an optimization.
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    const SCHEMA: &str = "
        DEFINE TABLE IF NOT EXISTS restaurant SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS menu_item SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS qr_code SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS orders SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS feedback SCHEMALESS;

        DEFINE INDEX IF NOT EXISTS uniq_qr_code ON TABLE qr_code COLUMNS code UNIQUE;
        DEFINE INDEX IF NOT EXISTS idx_qr_current ON TABLE qr_code COLUMNS restaurant, table_label, is_active;
        DEFINE INDEX IF NOT EXISTS idx_menu_item_restaurant ON TABLE menu_item COLUMNS restaurant;
        DEFINE INDEX IF NOT EXISTS idx_orders_queue ON TABLE orders COLUMNS restaurant, status;
        DEFINE INDEX IF NOT EXISTS idx_feedback_restaurant ON TABLE feedback COLUMNS restaurant;
    ";

    db.query(SCHEMA)
        .await
        .map_err(|e| AppError::Database(format!("Failed to apply schema: {e}")))?;
    tracing::info!("Database schema applied");
    Ok(())
}
