use mfa_infra::config::SmsConfig;
use mfa_shared::config::otp::{MAX_CODE_LENGTH, MAX_VALIDITY_SECONDS};
use mfa_shared::config::{AppConfig, Environment};
use thiserror::Error;

/// Algorithms the bearer token verifier accepts
const SUPPORTED_ALGORITHMS: [&str; 3] = ["HS256", "HS384", "HS512"];

/// Problems that stop the server from starting
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set in production")]
    DefaultSecretInProduction,

    #[error("Unsupported JWT algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("OTP validity must be greater than zero")]
    ZeroValidity,

    #[error("OTP validity of {0} seconds exceeds the maximum of {max}", max = MAX_VALIDITY_SECONDS)]
    ValidityTooLong(u64),

    #[error("OTP length of {0} digits exceeds the maximum of {max}", max = MAX_CODE_LENGTH)]
    CodeLengthTooLong(usize),

    #[error("Twilio credentials are required when SMS_PROVIDER=twilio in production")]
    MissingSmsCredentials,
}

/// Everything the binary needs, loaded once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub sms: SmsConfig,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            app: AppConfig::from_env(),
            sms: SmsConfig::from_env(),
        }
    }

    /// Reject settings that would make the service unsafe or useless
    ///
    /// Development tolerates the default secret and missing SMS
    /// credentials; the mock provider stands in for the latter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let jwt = &self.app.auth.jwt;

        let algorithm = jwt.algorithm.to_uppercase();
        if !SUPPORTED_ALGORITHMS.contains(&algorithm.as_str()) {
            return Err(ConfigError::UnsupportedAlgorithm(jwt.algorithm.clone()));
        }

        let otp = &self.app.otp;
        if otp.validity_seconds == 0 {
            return Err(ConfigError::ZeroValidity);
        }
        if otp.validity_seconds > MAX_VALIDITY_SECONDS {
            return Err(ConfigError::ValidityTooLong(otp.validity_seconds));
        }
        if otp.code_length > MAX_CODE_LENGTH {
            return Err(ConfigError::CodeLengthTooLong(otp.code_length));
        }

        if self.is_production() {
            if jwt.is_using_default_secret() {
                return Err(ConfigError::DefaultSecretInProduction);
            }
            if self.sms.provider == "twilio" && !self.sms.has_twilio_credentials() {
                return Err(ConfigError::MissingSmsCredentials);
            }
        }

        Ok(())
    }

    pub fn environment(&self) -> Environment {
        self.app.environment
    }

    pub fn is_development(&self) -> bool {
        self.app.environment.is_development()
    }

    pub fn is_production(&self) -> bool {
        self.app.environment.is_production()
    }

    pub fn bind_address(&self) -> String {
        self.app.server.bind_address()
    }
}
