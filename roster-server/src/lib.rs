//! Roster Server - 员工档案管理服务
//!
//! # 架构概述
//!
//! 本模块是 Roster Server 的主入口，提供以下核心功能：
//!
//! - **数据库** (`db`): 嵌入式 SQLite 存储 (sqlx)
//! - **HTTP API** (`api`): RESTful 员工档案接口
//! - **图片服务** (`services`): 头像校验、压缩与内容寻址存储
//!
//! # 模块结构
//!
//! ```text
//! roster-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── services/      # HTTP 组装、图片存储
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 错误、日志
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use shared::response::ApiResponse;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv + 日志)
///
/// 在 [`Config::from_env`] 之前调用，这样 `.env` 里的变量也能参与配置。
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | LOG_LEVEL | info | 日志级别 (trace/debug/info/warn/error) |
/// | LOG_DIR | (无) | 日志目录，设置后写入每日滚动文件 |
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
    ____             __
   / __ \____  _____/ /____  _____
  / /_/ / __ \/ ___/ __/ _ \/ ___/
 / _, _/ /_/ (__  ) /_/  __/ /
/_/ |_|\____/____/\__/\___/_/
    "#
    );
}
