//! Unit tests for SMS module

#[cfg(test)]
pub mod mock_sms_tests;
#[cfg(test)]
pub mod twilio_tests;
