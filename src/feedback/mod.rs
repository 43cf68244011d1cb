//! 反馈模块 - 订单反馈与情感分析回填
//!
//! - [`FeedbackLinker`] - 反馈提交与订单关联
//! - [`SentimentClassifier`] - 情感分析协作接口 (默认关键词实现)

pub mod linker;
pub mod sentiment;

pub use linker::{AttachFeedback, FeedbackError, FeedbackLinker};
pub use sentiment::{KeywordClassifier, SentimentClassifier, SentimentVerdict};
