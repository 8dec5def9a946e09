//! One-time passcode lifecycle
//!
//! This module owns the in-memory challenge store:
//! - Code generation from the OS random source
//! - Issuance, single-use validation and lazy expiry
//! - The background sweep that purges abandoned challenges

mod generator;
mod manager;
mod sweeper;


pub use generator::generate_numeric_code;
pub use manager::{IssuedOtp, OtpManager};
pub use sweeper::{OtpSweeper, OtpSweeperConfig};
