//! Shared types for the roster service
//!
//! Wire-contract types used by both roster-server and roster-client:
//! the response envelope, the employee model and payloads, and ID/time
//! helpers. DB row derives are feature-gated behind `db`.

pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{Employee, EmployeeInput, EmployeeListData, Pagination};
pub use response::ApiResponse;
