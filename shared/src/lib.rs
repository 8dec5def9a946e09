//! Shared configuration and common types for the MFA callback service
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The JSON response envelope returned by every endpoint
//! - Phone number helpers (E.164 validation, masking for logs)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CorsConfig, Environment, IssuePolicy, JwtConfig, LoggingConfig,
    OtpConfig, ServerConfig,
};
pub use types::{ApiResponse, HealthResponse};
pub use utils::phone;
