use std::path::PathBuf;

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// 服务器状态 - 配置与数据库连接池
///
/// ServerState 在每个请求处理器之间共享；`SqlitePool` 内部是 Arc，
/// Clone 成本极低。
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (database/, uploads/images/)
    /// 2. 数据库 (work_dir/database/roster.db, 自动执行迁移)
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::database(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("roster.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        Ok(Self {
            config: config.clone(),
            pool: db_service.pool,
        })
    }

    /// 获取工作目录
    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    /// 获取图片目录
    pub fn uploads_dir(&self) -> PathBuf {
        self.config.uploads_dir()
    }
}
