//! Employee Model

use serde::{Deserialize, Serialize};

use crate::response::Pagination;

/// Employee entity (员工)
///
/// Wire form is camelCase (`profileImage`, `createdAt`, `updatedAt`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub salary: f64,
    /// Relative path of the stored profile image, set only on upload
    pub profile_image: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Core employee fields, validated at the service boundary
///
/// Used by both create and update; the store assigns id and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub salary: f64,
}

/// List payload: one page of employees plus pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeListData {
    pub employees: Vec<Employee>,
    pub pagination: Pagination,
}
