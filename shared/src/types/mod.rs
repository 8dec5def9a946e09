//! Type definitions shared between the HTTP layer and its tests
//!
//! - `response` - the JSON response envelope and health payload

pub mod response;

pub use response::{ApiResponse, HealthResponse, HealthStatus};
