//! OrderLifecycle - order creation and status transitions
//!
//! The only two mutation paths for orders:
//!
//! - [`OrderLifecycle::create_order`] — validates lines against the live
//!   menu, freezes unit prices, computes the total and persists the order in
//!   `PENDING`. Orders are never constructed in any other status.
//! - [`OrderLifecycle::transition`] — checks ownership and the transition
//!   table, then applies a compare-and-set update on (status, version). A
//!   CAS loser re-reads once and retries if the target is still legal,
//!   otherwise reports [`LifecycleError::InvalidTransition`].
//!
//! Orders are never deleted; terminal states end the lifecycle.

use crate::db::models::{Order, OrderLine};
use crate::db::repository::{MenuItemRepository, OrderRepository, RepoError};
use crate::orders::OrderStatus;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Money is two-decimal fixed point
const DECIMAL_PLACES: u32 = 2;

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Order must contain at least one line")]
    EmptyOrder,

    #[error("Invalid item: {0}")]
    InvalidItem(String),

    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Order does not belong to the acting restaurant")]
    Forbidden,

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// One requested line of a new order
#[derive(Debug, Clone, Deserialize)]
pub struct OrderLineInput {
    /// Menu item id, "menu_item:xxx"
    pub menu_item: String,
    pub quantity: u32,
    pub special_instructions: Option<String>,
}

/// Optional diner identity captured with the order
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerInfo {
    pub table_label: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub special_instructions: Option<String>,
}

/// Order lifecycle service
#[derive(Clone)]
pub struct OrderLifecycle {
    orders: OrderRepository,
    menu_items: MenuItemRepository,
}

impl OrderLifecycle {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            menu_items: MenuItemRepository::new(db),
        }
    }

    /// Create an order from a diner's cart.
    ///
    /// Every referenced menu item must exist, belong to `restaurant` and be
    /// currently available; its *current* price is snapshotted into the line.
    /// Lines and total are written in one create, so a concurrent menu price
    /// change can never produce an order whose stored total disagrees with
    /// its stored lines.
    pub async fn create_order(
        &self,
        restaurant: &RecordId,
        lines: Vec<OrderLineInput>,
        customer: CustomerInfo,
    ) -> LifecycleResult<Order> {
        if lines.is_empty() {
            return Err(LifecycleError::EmptyOrder);
        }

        let mut order_lines = Vec::with_capacity(lines.len());
        let mut total = Decimal::ZERO;

        for line in lines {
            if line.quantity < 1 {
                return Err(LifecycleError::InvalidItem(format!(
                    "Quantity must be at least 1 for item {}",
                    line.menu_item
                )));
            }

            let item_id: RecordId = line.menu_item.parse().map_err(|_| {
                LifecycleError::InvalidItem(format!("Invalid menu item id: {}", line.menu_item))
            })?;

            let item = self
                .menu_items
                .find_by_id(&item_id)
                .await?
                .ok_or_else(|| {
                    LifecycleError::InvalidItem(format!("Menu item {} not found", line.menu_item))
                })?;

            if &item.restaurant != restaurant {
                return Err(LifecycleError::InvalidItem(format!(
                    "Menu item {} does not belong to this restaurant",
                    line.menu_item
                )));
            }
            if !item.is_available {
                return Err(LifecycleError::InvalidItem(format!(
                    "Menu item '{}' is not available",
                    item.name
                )));
            }

            let unit_price = item.price.round_dp(DECIMAL_PLACES);
            if unit_price <= Decimal::ZERO {
                return Err(LifecycleError::InvalidItem(format!(
                    "Menu item '{}' has a non-positive price",
                    item.name
                )));
            }

            total += unit_price * Decimal::from(line.quantity);
            order_lines.push(OrderLine {
                menu_item: item_id,
                name: item.name,
                quantity: line.quantity,
                unit_price,
                special_instructions: line.special_instructions,
            });
        }

        let now = Utc::now();
        let order = Order {
            id: None,
            restaurant: restaurant.clone(),
            table_label: customer.table_label,
            customer_name: customer.customer_name,
            customer_phone: customer.customer_phone,
            status: OrderStatus::Pending,
            total_amount: total.round_dp(DECIMAL_PLACES),
            special_instructions: customer.special_instructions,
            lines: order_lines,
            version: 0,
            created_at: now,
            updated_at: now,
        };

        let created = self.orders.create(order).await?;
        tracing::info!(
            order = %created.id.as_ref().map(ToString::to_string).unwrap_or_default(),
            total = %created.total_amount,
            "Order created"
        );
        Ok(created)
    }

    /// Drive an order one step along the transition table.
    ///
    /// Rejects cross-restaurant access with [`LifecycleError::Forbidden`]
    /// before revealing anything about the order's state.
    pub async fn transition(
        &self,
        order_id: &str,
        target: OrderStatus,
        acting_restaurant: &RecordId,
    ) -> LifecycleResult<Order> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| LifecycleError::OrderNotFound(order_id.to_string()))?;

        if &order.restaurant != acting_restaurant {
            return Err(LifecycleError::Forbidden);
        }

        let current = order.status;
        if !current.can_transition_to(target) {
            return Err(LifecycleError::InvalidTransition {
                from: current,
                to: target,
            });
        }

        let id = order
            .id
            .clone()
            .ok_or_else(|| RepoError::Database("Order record without id".to_string()))?;

        if let Some(updated) = self
            .orders
            .transition_cas(&id, current, target, order.version)
            .await?
        {
            return Ok(updated);
        }

        // CAS lost to a concurrent writer. Re-read once: if the target is
        // still reachable from the new status, retry once; otherwise the
        // loser gets InvalidTransition.
        let fresh = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| LifecycleError::OrderNotFound(order_id.to_string()))?;

        if !fresh.status.can_transition_to(target) {
            return Err(LifecycleError::InvalidTransition {
                from: fresh.status,
                to: target,
            });
        }

        tracing::debug!(order = %order_id, "Transition CAS conflict, retrying once");
        self.orders
            .transition_cas(&id, fresh.status, target, fresh.version)
            .await?
            .ok_or(LifecycleError::InvalidTransition {
                from: fresh.status,
                to: target,
            })
    }

    /// Read one order, enforcing restaurant ownership
    pub async fn get_order(
        &self,
        order_id: &str,
        acting_restaurant: &RecordId,
    ) -> LifecycleResult<Order> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| LifecycleError::OrderNotFound(order_id.to_string()))?;
        if &order.restaurant != acting_restaurant {
            return Err(LifecycleError::Forbidden);
        }
        Ok(order)
    }

    /// Operational order queue for a restaurant
    pub async fn list_orders(
        &self,
        restaurant: &RecordId,
        status: Option<OrderStatus>,
    ) -> LifecycleResult<Vec<Order>> {
        Ok(self.orders.find_by_restaurant(restaurant, status).await?)
    }
}
