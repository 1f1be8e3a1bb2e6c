//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`employees`] - 员工档案接口
//! - [`images`] - 头像图片读取接口

pub mod employees;
pub mod health;
pub mod images;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
