pub mod auth;

pub use auth::{AuthRequest, OtpVerificationRequest};
