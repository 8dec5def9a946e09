//! Multi-factor challenge orchestration
//!
//! Ties the passcode store to an out-of-band delivery channel. Issuance is
//! recorded before delivery starts, and delivery runs detached so a slow or
//! failing provider never holds up or fails the request that issued the code.

mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use service::MfaService;
pub use traits::OtpDelivery;
pub use types::IssuedChallenge;
