//! Mock delivery channel for testing the MFA service

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::services::mfa::OtpDelivery;

/// A delivered (destination, code, validity_minutes) triple
pub type Delivered = (String, String, u64);

// Mock delivery channel that records every message
pub struct MockDelivery {
    pub delivered: Arc<Mutex<Vec<Delivered>>>,
    pub should_fail: bool,
}

impl MockDelivery {
    pub fn new(should_fail: bool) -> Self {
        Self {
            delivered: Arc::new(Mutex::new(Vec::new())),
            should_fail,
        }
    }

    pub fn last_code_for(&self, destination: &str) -> Option<String> {
        self.delivered
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _, _)| to == destination)
            .map(|(_, code, _)| code.clone())
    }

    pub fn count(&self) -> usize {
        self.delivered.lock().unwrap().len()
    }
}

#[async_trait]
impl OtpDelivery for MockDelivery {
    async fn deliver(
        &self,
        destination: &str,
        code: &str,
        validity_minutes: u64,
    ) -> Result<String, String> {
        if self.should_fail {
            return Err("delivery provider unavailable".to_string());
        }
        let mut delivered = self.delivered.lock().unwrap();
        delivered.push((destination.to_string(), code.to_string(), validity_minutes));
        Ok(format!("mock-msg-{}", delivered.len()))
    }

    fn channel_name(&self) -> &str {
        "mock"
    }
}
