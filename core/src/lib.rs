//! # MFA Core
//!
//! Core domain layer for the MFA callback service.
//! This crate owns the one-time passcode store and its lifecycle (issue,
//! validate, expire), the background expiry sweep, and the orchestration
//! that hands freshly issued codes to a delivery collaborator.
//!
//! Nothing in this crate performs network or disk I/O on the request path.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
