//! Feedback API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::api::convert::parse_record_id;
use crate::core::ServerState;
use crate::db::models::Feedback;
use crate::feedback::AttachFeedback;
use crate::utils::{AppError, AppResult};

/// 反馈提交请求体
///
/// 评分范围 (1..=5) 由领域层校验，这里只管文本长度和邮箱格式。
#[derive(Debug, Deserialize, Validate)]
pub struct FeedbackRequest {
    /// "restaurant:xxx"
    pub restaurant_id: String,
    /// "orders:xxx"，可缺省 (店面整体反馈)
    pub order_id: Option<String>,
    pub rating: Option<u8>,
    #[validate(length(max = 500))]
    pub comment: Option<String>,
    #[validate(length(max = 100))]
    pub customer_name: Option<String>,
    #[validate(email)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub is_anonymous: bool,
}

/// 列表查询参数
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub restaurant_id: String,
}

/// POST /api/feedback - 提交反馈
pub async fn submit(
    State(state): State<ServerState>,
    Json(payload): Json<FeedbackRequest>,
) -> AppResult<Json<Feedback>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let restaurant_id = parse_record_id(&payload.restaurant_id, "restaurant_id")?;

    let feedback = state
        .feedback_linker()
        .attach(
            &restaurant_id,
            AttachFeedback {
                order_id: payload.order_id,
                rating: payload.rating,
                comment: payload.comment,
                customer_name: payload.customer_name,
                customer_email: payload.customer_email,
                is_anonymous: payload.is_anonymous,
            },
        )
        .await?;
    Ok(Json(feedback))
}

/// GET /api/feedback/:id - 读取单条反馈
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Feedback>> {
    let feedback = state
        .feedback_linker()
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Feedback {id} not found")))?;
    Ok(Json(feedback))
}

/// GET /api/feedback - 餐厅反馈列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Feedback>>> {
    let restaurant_id = parse_record_id(&query.restaurant_id, "restaurant_id")?;
    let feedback = state.feedback_linker().list(&restaurant_id).await?;
    Ok(Json(feedback))
}
