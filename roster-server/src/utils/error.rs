//! 统一错误处理
//!
//! 提供应用级错误类型 [`AppError`]，并负责渲染统一响应信封。
//!
//! # 状态码映射
//!
//! | 变体 | 状态码 | 说明 |
//! |------|--------|------|
//! | Validation | 400 | 请求字段缺失或无效 |
//! | Conflict | 409 | 邮箱已存在 |
//! | NotFound | 404 | 员工不存在 |
//! | Database | 500 | 存储层故障 |
//!
//! 500 响应的 `message` 固定为 "Internal Server Error"，底层错误原文放在
//! 信封的 `error` 字段中。

use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::db::repository::RepoError;
use shared::ApiResponse;

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    /// 验证失败 (400)
    Validation(String),

    #[error("Resource already exists: {0}")]
    /// 资源冲突 (409)
    Conflict(String),

    #[error("Resource not found: {0}")]
    /// 资源不存在 (404)
    NotFound(String),

    #[error("Database error: {0}")]
    /// 数据库错误 (500)
    Database(String),
}

impl AppError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Validation(msg) | AppError::Conflict(msg) | AppError::NotFound(msg) => {
                ApiResponse::failure(msg)
            }
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                ApiResponse::failure_with_error("Internal Server Error", msg)
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Validation(format!("Multipart error: {}", e))
    }
}

/// 处理器的 Result 类型别名
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::validation("All fields are required").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::conflict("Employee with this email already exists").status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::not_found("Employee not found").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::database("disk I/O error").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_repo_error_conversion() {
        let err: AppError = RepoError::Duplicate("Employee with this email already exists".into()).into();
        assert!(matches!(err, AppError::Conflict(_)));

        let err: AppError = RepoError::NotFound("Employee not found".into()).into();
        assert!(matches!(err, AppError::NotFound(_)));

        let err: AppError = RepoError::Database("database is locked".into()).into();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn test_database_error_envelope() {
        let response = AppError::database("database is locked").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Internal Server Error");
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "database is locked");
    }

    #[tokio::test]
    async fn test_not_found_envelope() {
        let response = AppError::not_found("Employee not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Employee not found");
        assert_eq!(body["success"], false);
        assert!(body.get("data").is_none());
        assert!(body.get("error").is_none());
    }
}
