use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::feedback::{FeedbackLinker, KeywordClassifier, SentimentClassifier};
use crate::orders::OrderLifecycle;
use crate::qrcode::SessionValidator;
use crate::utils::AppError;

/// 服务器状态 - 持有所有共享服务的引用
///
/// 使用 Arc/克隆实现浅拷贝，每个请求处理器持有一份。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | classifier | Arc<dyn SentimentClassifier> | 情感分析协作方 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 情感分析协作方 (反馈回填)
    pub classifier: Arc<dyn SentimentClassifier>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造，测试常用)
    pub fn new(config: Config, db: Surreal<Db>, classifier: Arc<dyn SentimentClassifier>) -> Self {
        Self {
            config,
            db,
            classifier,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 确保工作目录存在
    /// 2. 打开数据库 (work_dir/database) 并应用 schema
    /// 3. 装配默认情感分析器
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db_dir = config.database_dir();
        std::fs::create_dir_all(&db_dir)
            .map_err(|e| AppError::Internal(format!("Failed to create work directory: {e}")))?;

        let db_service = DbService::new(&db_dir.to_string_lossy()).await?;

        Ok(Self::new(
            config.clone(),
            db_service.db,
            Arc::new(KeywordClassifier),
        ))
    }

    /// 初始化内存态服务器状态 (测试)
    pub async fn initialize_in_memory(config: Config) -> Result<Self, AppError> {
        let db_service = DbService::new_in_memory().await?;
        Ok(Self::new(config, db_service.db, Arc::new(KeywordClassifier)))
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 会话校验服务
    pub fn session_validator(&self) -> SessionValidator {
        SessionValidator::new(self.db.clone(), self.config.qr_base_url.clone())
    }

    /// 订单生命周期服务
    pub fn order_lifecycle(&self) -> OrderLifecycle {
        OrderLifecycle::new(self.db.clone())
    }

    /// 反馈服务
    pub fn feedback_linker(&self) -> FeedbackLinker {
        FeedbackLinker::new(self.db.clone(), self.classifier.clone())
    }
}
