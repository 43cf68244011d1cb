//! 类型与错误转换模块
//!
//! 将领域错误 (qrcode / orders / feedback) 映射为对外的 [`AppError`]。
//! 会话类失败在这里统一坍缩为 "invalid session"，不向调用方泄露令牌是否存在。

use crate::db::repository::RepoError;
use crate::feedback::FeedbackError;
use crate::orders::LifecycleError;
use crate::qrcode::SessionError;
use crate::utils::AppError;
use surrealdb::RecordId;

/// Parse a "table:id" string from an API payload
pub fn parse_record_id(id: &str, field: &str) -> Result<RecordId, AppError> {
    id.parse()
        .map_err(|_| AppError::Validation(format!("Invalid {field}: {id}")))
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        match e {
            // Deliberately indistinguishable to the caller
            SessionError::NotFound | SessionError::Inactive => {
                tracing::debug!(reason = %e, "Session resolution rejected");
                AppError::invalid_session()
            }
            SessionError::RestaurantNotFound(msg) => {
                AppError::NotFound(format!("Restaurant not found: {msg}"))
            }
            SessionError::AlreadyIssued(table) => AppError::Conflict(format!(
                "An active QR code already exists for table '{table}', regenerate it instead"
            )),
            // Operational fault: details are already in the logs, the caller
            // only learns that generation failed
            SessionError::GenerationExhausted { attempts } => {
                AppError::Internal(format!("Token generation exhausted after {attempts} attempts"))
            }
            SessionError::Repo(e) => e.into(),
        }
    }
}

impl From<LifecycleError> for AppError {
    fn from(e: LifecycleError) -> Self {
        match e {
            LifecycleError::EmptyOrder => AppError::Validation(e.to_string()),
            LifecycleError::InvalidItem(msg) => {
                AppError::BusinessRule(format!("Invalid item: {msg}"))
            }
            LifecycleError::InvalidTransition { from, to } => {
                AppError::BusinessRule(format!("Invalid transition: {from} -> {to}"))
            }
            LifecycleError::Forbidden => {
                AppError::Forbidden("Order belongs to another restaurant".to_string())
            }
            LifecycleError::OrderNotFound(id) => AppError::NotFound(format!("Order {id} not found")),
            LifecycleError::Repo(e) => e.into(),
        }
    }
}

impl From<FeedbackError> for AppError {
    fn from(e: FeedbackError) -> Self {
        match e {
            FeedbackError::InvalidRating(r) => {
                AppError::Validation(format!("Rating must be between 1 and 5, got {r}"))
            }
            FeedbackError::OrderNotFound(id) => {
                AppError::NotFound(format!("Order {id} not found"))
            }
            FeedbackError::Repo(e) => e.into(),
        }
    }
}
