//! 工具模块 - 错误类型与日志
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型，负责渲染响应信封
//! - [`logger`] - tracing 初始化

pub mod error;
pub mod logger;

pub use error::{AppError, AppResult};
