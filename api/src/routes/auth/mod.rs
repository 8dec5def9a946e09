//! Authentication route handlers
//!
//! Both endpoints sit behind the JWT middleware; the passcode is bound to
//! the token subject, never to anything in the request body.
//! - Initiating MFA (issue and send a code)
//! - Verifying a submitted code

pub mod initiate_mfa;
pub mod verify_otp;

pub use initiate_mfa::initiate_mfa;
pub use verify_otp::verify_otp;
