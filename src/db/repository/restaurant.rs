//! Restaurant Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Restaurant, RestaurantCreate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "restaurant";

#[derive(Clone)]
pub struct RestaurantRepository {
    base: BaseRepository,
}

impl RestaurantRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find restaurant by id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Restaurant>> {
        let restaurant: Option<Restaurant> = self.base.db().select(id.clone()).await?;
        Ok(restaurant)
    }

    /// Create a new restaurant
    pub async fn create(&self, data: RestaurantCreate) -> RepoResult<Restaurant> {
        // Internal struct without serde_helpers so the write carries no id
        // field; the public model's string ids are for API JSON
        #[derive(serde::Serialize)]
        struct InternalRestaurant {
            name: String,
            description: Option<String>,
            address: Option<String>,
            phone: Option<String>,
            email: Option<String>,
            is_active: bool,
            created_at: chrono::DateTime<chrono::Utc>,
        }

        let restaurant = InternalRestaurant {
            name: data.name,
            description: data.description,
            address: data.address,
            phone: data.phone,
            email: data.email,
            is_active: true,
            created_at: chrono::Utc::now(),
        };
        let created: Option<Restaurant> = self.base.db().create(TABLE).content(restaurant).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create restaurant".to_string()))
    }

    /// Flip the active flag. Deactivation implicitly invalidates every
    /// session token of the restaurant (checked at resolve time).
    pub async fn set_active(&self, id: &RecordId, is_active: bool) -> RepoResult<Restaurant> {
        self.base
            .db()
            .query("UPDATE $thing SET is_active = $is_active")
            .bind(("thing", id.clone()))
            .bind(("is_active", is_active))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Restaurant {} not found", id)))
    }
}
