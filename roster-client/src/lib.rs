//! Roster Client - HTTP client for the roster service
//!
//! Provides network-based HTTP calls to the employee API.

pub mod config;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::models::{Employee, EmployeeInput, EmployeeListData};
pub use shared::response::{ApiResponse, Pagination};
