//! API Response types
//!
//! Standardized response envelope for the roster service

use serde::{Deserialize, Serialize};

/// Unified API response structure
///
/// All API responses follow this format:
/// ```json
/// {
///     "message": "Employee Created Successfully",
///     "success": true,
///     "data": { ... }
/// }
/// ```
///
/// `data` is present on success responses that carry a payload; `error`
/// is present only on internal failures and carries the raw store message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Human-readable message
    pub message: String,
    /// Whether the operation succeeded
    pub success: bool,
    /// Response data (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Underlying error detail (optional, internal failures only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response with data
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create a successful response without data
    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
            data: None,
            error: None,
        }
    }

    /// Create a failure response
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
            data: None,
            error: None,
        }
    }

    /// Create a failure response carrying the underlying error detail
    pub fn failure_with_error(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Pagination metadata for list responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Total number of matching employees
    pub total_employees: i64,
    /// Current page number (1-based)
    pub current_page: u32,
    /// Total number of pages
    pub total_pages: u32,
    /// Items per page
    pub page_size: u32,
}

impl Pagination {
    /// Create a new pagination
    pub fn new(current_page: u32, page_size: u32, total_employees: i64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            ((total_employees as f64) / (page_size as f64)).ceil() as u32
        };
        Self {
            total_employees,
            current_page,
            total_pages,
            page_size,
        }
    }
}
