//! QR Code API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::api::convert::parse_record_id;
use crate::core::ServerState;
use crate::db::models::QrCode;
use crate::utils::validation::{MAX_TABLE_LABEL_LEN, validate_required_text};
use crate::utils::AppResult;

/// 签发 / 重发请求体
#[derive(Debug, Deserialize)]
pub struct QrCodeRequest {
    /// "restaurant:xxx"
    pub restaurant_id: String,
    pub table_label: String,
}

/// 列表查询参数
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub restaurant_id: String,
    #[serde(default)]
    pub active_only: bool,
}

/// POST /api/qrcodes - 为桌台签发首个令牌
///
/// 该桌台已有活跃令牌时返回 409，换码走 regenerate。
pub async fn issue(
    State(state): State<ServerState>,
    Json(payload): Json<QrCodeRequest>,
) -> AppResult<Json<QrCode>> {
    validate_required_text(&payload.table_label, "table_label", MAX_TABLE_LABEL_LEN)?;
    let restaurant_id = parse_record_id(&payload.restaurant_id, "restaurant_id")?;

    let qr = state
        .session_validator()
        .issue(&restaurant_id, &payload.table_label)
        .await?;
    Ok(Json(qr))
}

/// POST /api/qrcodes/regenerate - 作废当前令牌并签发新令牌
pub async fn regenerate(
    State(state): State<ServerState>,
    Json(payload): Json<QrCodeRequest>,
) -> AppResult<Json<QrCode>> {
    validate_required_text(&payload.table_label, "table_label", MAX_TABLE_LABEL_LEN)?;
    let restaurant_id = parse_record_id(&payload.restaurant_id, "restaurant_id")?;

    let qr = state
        .session_validator()
        .regenerate(&restaurant_id, &payload.table_label)
        .await?;
    Ok(Json(qr))
}

/// POST /api/qrcodes/:id/deactivate - 手动停用令牌 (单向)
pub async fn deactivate(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<QrCode>> {
    let qr = state.session_validator().deactivate(&id).await?;
    Ok(Json(qr))
}

/// GET /api/qrcodes - 餐厅的令牌列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<QrCode>>> {
    let restaurant_id = parse_record_id(&query.restaurant_id, "restaurant_id")?;
    let codes = state
        .session_validator()
        .list(&restaurant_id, query.active_only)
        .await?;
    Ok(Json(codes))
}
