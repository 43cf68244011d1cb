//! Menu.X Server - 扫码点餐后端
//!
//! # 架构概述
//!
//! 本模块是 Menu.X 后端的主入口，提供以下核心功能：
//!
//! - **会话令牌** (`qrcode`): 桌台二维码令牌的签发、重发与解析
//! - **订单生命周期** (`orders`): 下单、价格快照与状态机流转
//! - **反馈** (`feedback`): 顾客反馈与异步情感回填
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── qrcode/        # 令牌生成与会话校验
//! ├── orders/        # 订单状态机与生命周期
//! ├── feedback/      # 反馈与情感分析
//! ├── db/            # 数据库层 (模型 + 仓储)
//! └── utils/         # 错误、日志、输入校验
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod feedback;
pub mod orders;
pub mod qrcode;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use feedback::{FeedbackLinker, SentimentClassifier};
pub use orders::{OrderLifecycle, OrderStatus};
pub use qrcode::{SessionValidator, TokenGenerator};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> Result<(), AppError> {
    // .env 缺失不是错误，生产环境通常直接注入环境变量
    let _ = dotenv::dotenv();

    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(None, log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    __  ___                 _  __
   /  |/  /__  ____  __  __| |/ /
  / /|_/ / _ \/ __ \/ / / /|   /
 / /  / /  __/ / / / /_/ //   |
/_/  /_/\___/_/ /_/\__,_//_/|_|
    "#
    );
}
