//! Session API 模块
//!
//! 顾客扫码后的会话解析：令牌换取 (餐厅, 桌台) 上下文。
//! 令牌不存在与已停用对外不做区分，统一 404 "Invalid session"。

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::core::ServerState;
use crate::qrcode::SessionContext;
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/session/{code}", get(resolve))
}

/// GET /api/session/:code - 解析会话令牌
pub async fn resolve(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<SessionContext>> {
    let context = state.session_validator().resolve(&code).await?;
    Ok(Json(context))
}
