use serde::{Deserialize, Serialize};
use validator::Validate;

use mfa_shared::utils::phone::is_valid_e164;

use crate::handlers::ApiError;

/// Body of `POST /api/v1/auth/initiate-mfa`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    /// Destination for the code, E.164 format (e.g. "+14155552671")
    #[validate(length(min = 3, max = 16))]
    pub phone_number: String,
}

impl AuthRequest {
    /// Field rules plus the E.164 format check
    pub fn check(&self) -> Result<(), ApiError> {
        self.validate()?;
        if !is_valid_e164(&self.phone_number) {
            return Err(ApiError::Validation(
                "phoneNumber: must be in E.164 format".to_string(),
            ));
        }
        Ok(())
    }
}

/// Body of `POST /api/v1/auth/verify-otp`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OtpVerificationRequest {
    /// The code received out-of-band
    #[validate(length(min = 4, max = 12))]
    pub otp: String,

    /// Optional identity the client believes it is verifying; must match
    /// the bearer token subject when present
    #[serde(default)]
    pub user_id: Option<String>,
}

impl OtpVerificationRequest {
    /// Field rules plus the digits-only check
    pub fn check(&self) -> Result<(), ApiError> {
        self.validate()?;
        if !self.otp.chars().all(|c| c.is_ascii_digit()) {
            return Err(ApiError::Validation("otp: must contain only digits".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_request_uses_camel_case() {
        let request: AuthRequest =
            serde_json::from_str(r#"{"phoneNumber":"+14155552671"}"#).unwrap();
        assert_eq!(request.phone_number, "+14155552671");
        assert!(request.check().is_ok());
    }

    #[test]
    fn test_auth_request_rejects_non_e164() {
        for phone in ["14155552671", "+0123456789", "+1 415 555 2671", ""] {
            let request = AuthRequest {
                phone_number: phone.to_string(),
            };
            assert!(matches!(request.check(), Err(ApiError::Validation(_))), "{}", phone);
        }
    }

    #[test]
    fn test_otp_request_rules() {
        let ok = |otp: &str| {
            OtpVerificationRequest {
                otp: otp.to_string(),
                user_id: None,
            }
            .check()
            .is_ok()
        };

        assert!(ok("1234"));
        assert!(ok("012345"));
        assert!(ok("123456789012"));
        assert!(!ok("123"));
        assert!(!ok("1234567890123"));
        assert!(!ok("12a456"));
        assert!(!ok(""));
    }

    #[test]
    fn test_every_issuable_code_passes_the_otp_rules() {
        use mfa_core::services::otp::OtpManager;
        use mfa_shared::config::otp::{MAX_CODE_LENGTH, MIN_CODE_LENGTH};
        use mfa_shared::config::OtpConfig;

        for code_length in [1, MIN_CODE_LENGTH, 6, MAX_CODE_LENGTH, MAX_CODE_LENGTH + 1, 40] {
            let manager = OtpManager::new(&OtpConfig {
                code_length,
                ..Default::default()
            });
            let otp = manager.issue("user-1").unwrap();
            let request = OtpVerificationRequest { otp, user_id: None };
            assert!(request.check().is_ok(), "configured length {}", code_length);
        }
    }

    #[test]
    fn test_user_id_is_optional() {
        let request: OtpVerificationRequest = serde_json::from_str(r#"{"otp":"123456"}"#).unwrap();
        assert!(request.user_id.is_none());

        let request: OtpVerificationRequest =
            serde_json::from_str(r#"{"otp":"123456","userId":"user-1"}"#).unwrap();
        assert_eq!(request.user_id.as_deref(), Some("user-1"));
    }
}
