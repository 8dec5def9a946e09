//! Business services containing domain logic and use cases.

pub mod mfa;
pub mod otp;

// Re-export commonly used types
pub use mfa::{IssuedChallenge, MfaService, OtpDelivery};
pub use otp::{IssuedOtp, OtpManager, OtpSweeper, OtpSweeperConfig};
