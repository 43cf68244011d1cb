//! Order Repository
//!
//! Status is never assigned with a plain UPDATE: [`transition_cas`] is the
//! only mutation path, a conditional write on (status, version) so two
//! concurrent transitions cannot both succeed from the same snapshot.
//!
//! [`transition_cas`]: OrderRepository::transition_cas

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Order;
use crate::orders::OrderStatus;
use chrono::Utc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "orders";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let thing: RecordId = self.base.parse_id(id)?;
        let order: Option<Order> = self.base.db().select(thing).await?;
        Ok(order)
    }

    /// Operational queue: orders of a restaurant, optionally by status,
    /// newest first
    pub async fn find_by_restaurant(
        &self,
        restaurant: &RecordId,
        status: Option<OrderStatus>,
    ) -> RepoResult<Vec<Order>> {
        let mut query = self.base.db().query(match status {
            Some(_) => {
                "SELECT * FROM orders WHERE restaurant = $restaurant AND status = $status ORDER BY created_at DESC"
            }
            None => "SELECT * FROM orders WHERE restaurant = $restaurant ORDER BY created_at DESC",
        });
        query = query.bind(("restaurant", restaurant.clone()));
        if let Some(status) = status {
            query = query.bind(("status", status));
        }
        let orders: Vec<Order> = query.await?.take(0)?;
        Ok(orders)
    }

    /// Persist a freshly built order (lines embedded, single write)
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        // Internal structs without serde_helpers: link fields go in as
        // native RecordId values, and the unset id stays out of the write
        #[derive(serde::Serialize)]
        struct InternalLine {
            menu_item: RecordId,
            name: String,
            quantity: u32,
            unit_price: rust_decimal::Decimal,
            special_instructions: Option<String>,
        }

        #[derive(serde::Serialize)]
        struct InternalOrder {
            restaurant: RecordId,
            table_label: Option<String>,
            customer_name: Option<String>,
            customer_phone: Option<String>,
            status: OrderStatus,
            total_amount: rust_decimal::Decimal,
            special_instructions: Option<String>,
            lines: Vec<InternalLine>,
            version: u32,
            created_at: chrono::DateTime<Utc>,
            updated_at: chrono::DateTime<Utc>,
        }

        let content = InternalOrder {
            restaurant: order.restaurant,
            table_label: order.table_label,
            customer_name: order.customer_name,
            customer_phone: order.customer_phone,
            status: order.status,
            total_amount: order.total_amount,
            special_instructions: order.special_instructions,
            lines: order
                .lines
                .into_iter()
                .map(|l| InternalLine {
                    menu_item: l.menu_item,
                    name: l.name,
                    quantity: l.quantity,
                    unit_price: l.unit_price,
                    special_instructions: l.special_instructions,
                })
                .collect(),
            version: order.version,
            created_at: order.created_at,
            updated_at: order.updated_at,
        };
        let created: Option<Order> = self.base.db().create(TABLE).content(content).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Compare-and-set status transition.
    ///
    /// Succeeds only if the stored order still has the expected status and
    /// version; returns `None` when the condition failed (concurrent writer
    /// won), leaving conflict policy to the caller.
    pub async fn transition_cas(
        &self,
        id: &RecordId,
        from: OrderStatus,
        to: OrderStatus,
        version: u32,
    ) -> RepoResult<Option<Order>> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $order SET status = $to, version = version + 1, updated_at = $now \
                 WHERE status = $from AND version = $version \
                 RETURN AFTER",
            )
            .bind(("order", id.clone()))
            .bind(("to", to))
            .bind(("from", from))
            .bind(("version", version))
            .bind(("now", Utc::now()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }
}
