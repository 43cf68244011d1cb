//! Menu Item Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{MenuItem, MenuItemCreate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "menu_item";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find menu item by id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<MenuItem>> {
        let item: Option<MenuItem> = self.base.db().select(id.clone()).await?;
        Ok(item)
    }

    /// Create a new menu item
    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        // Native RecordId so `restaurant` is stored as a record link, not a
        // string; queries bind RecordId values against it
        #[derive(serde::Serialize)]
        struct InternalMenuItem {
            restaurant: RecordId,
            name: String,
            description: Option<String>,
            price: rust_decimal::Decimal,
            is_available: bool,
            created_at: chrono::DateTime<chrono::Utc>,
        }

        let item = InternalMenuItem {
            restaurant: data.restaurant,
            name: data.name,
            description: data.description,
            price: data.price,
            is_available: true,
            created_at: chrono::Utc::now(),
        };
        let created: Option<MenuItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Update availability
    pub async fn set_available(&self, id: &RecordId, is_available: bool) -> RepoResult<MenuItem> {
        self.base
            .db()
            .query("UPDATE $thing SET is_available = $is_available")
            .bind(("thing", id.clone()))
            .bind(("is_available", is_available))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }
}
