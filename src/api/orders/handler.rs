//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::api::convert::parse_record_id;
use crate::core::ServerState;
use crate::db::models::Order;
use crate::orders::{CustomerInfo, OrderLineInput, OrderStatus};
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_PHONE_LEN, MAX_TABLE_LABEL_LEN, validate_optional_text,
};

/// 下单请求体
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    /// "restaurant:xxx"
    pub restaurant_id: String,
    pub lines: Vec<OrderLineInput>,
    pub table_label: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub special_instructions: Option<String>,
}

/// 状态流转请求体
#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    /// 操作方餐厅, "restaurant:xxx"
    pub restaurant_id: String,
    pub target_status: OrderStatus,
}

/// 查询参数 (单条读取与列表共用)
#[derive(Debug, Deserialize)]
pub struct OrderQuery {
    pub restaurant_id: String,
    /// 列表时按状态过滤 (操作队列)
    pub status: Option<OrderStatus>,
}

/// POST /api/orders - 创建订单 (始终 PENDING)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<Order>> {
    validate_optional_text(&payload.table_label, "table_label", MAX_TABLE_LABEL_LEN)?;
    validate_optional_text(&payload.customer_name, "customer_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.customer_phone, "customer_phone", MAX_PHONE_LEN)?;
    validate_optional_text(
        &payload.special_instructions,
        "special_instructions",
        MAX_NOTE_LEN,
    )?;

    let restaurant_id = parse_record_id(&payload.restaurant_id, "restaurant_id")?;
    let customer = CustomerInfo {
        table_label: payload.table_label,
        customer_name: payload.customer_name,
        customer_phone: payload.customer_phone,
        special_instructions: payload.special_instructions,
    };

    let order = state
        .order_lifecycle()
        .create_order(&restaurant_id, payload.lines, customer)
        .await?;
    Ok(Json(order))
}

/// GET /api/orders/:id - 读取单个订单 (校验归属)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<OrderQuery>,
) -> AppResult<Json<Order>> {
    let restaurant_id = parse_record_id(&query.restaurant_id, "restaurant_id")?;
    let order = state.order_lifecycle().get_order(&id, &restaurant_id).await?;
    Ok(Json(order))
}

/// GET /api/orders - 餐厅订单队列，可按状态过滤
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OrderQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let restaurant_id = parse_record_id(&query.restaurant_id, "restaurant_id")?;
    let orders = state
        .order_lifecycle()
        .list_orders(&restaurant_id, query.status)
        .await?;
    Ok(Json(orders))
}

/// POST /api/orders/:id/transition - 推进订单状态
pub async fn transition(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TransitionRequest>,
) -> AppResult<Json<Order>> {
    let restaurant_id = parse_record_id(&payload.restaurant_id, "restaurant_id")?;
    let order = state
        .order_lifecycle()
        .transition(&id, payload.target_status, &restaurant_id)
        .await?;
    Ok(Json(order))
}
