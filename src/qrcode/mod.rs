//! 桌台会话模块 - QR 令牌的生成、签发与校验
//!
//! - [`TokenGenerator`] - 令牌候选生成 (前缀 + 时间戳 + 随机后缀)
//! - [`SessionValidator`] - 令牌生命周期与会话解析

pub mod generator;
pub mod validator;

pub use generator::{CandidateProducer, TokenGenerator};
pub use validator::{SessionContext, SessionError, SessionValidator};
