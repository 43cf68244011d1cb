//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`qrcodes`] - 桌台二维码令牌管理 (签发 / 重发 / 停用 / 列表)
//! - [`session`] - 扫码会话解析
//! - [`orders`] - 订单创建与状态流转
//! - [`feedback`] - 顾客反馈

pub mod convert;

pub mod feedback;
pub mod health;
pub mod orders;
pub mod qrcodes;
pub mod session;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
