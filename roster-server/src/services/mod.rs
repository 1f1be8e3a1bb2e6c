//! 服务模块
//!
//! - [`http`] - 路由组装与中间件
//! - [`images`] - 头像图片存储

pub mod http;
pub mod images;
