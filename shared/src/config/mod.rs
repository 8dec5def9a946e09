//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT bearer token verification
//! - `environment` - Environment detection and logging configuration
//! - `otp` - One-time passcode length, validity and sweep schedule
//! - `server` - HTTP server and CORS configuration
//!
//! Every section has a `Default` and a `from_env` constructor. Unset or
//! unparsable variables fall back to the default value.

pub mod auth;
pub mod environment;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig};
pub use environment::{Environment, LoggingConfig};
pub use otp::{IssuePolicy, OtpConfig};
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Service name reported by the health endpoint
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// One-time passcode configuration
    #[serde(default)]
    pub otp: OtpConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            app_name: default_app_name(),
            environment: env,
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            otp: OtpConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            app_name: std::env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
            environment,
            server: ServerConfig::from_env(),
            auth: AuthConfig::from_env(),
            otp: OtpConfig::from_env(),
            cors: CorsConfig::from_env(environment),
            logging: LoggingConfig::from_env(environment),
        }
    }
}

/// Read an environment variable and parse it, falling back to `default`
/// when the variable is unset or does not parse.
pub(crate) fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn default_app_name() -> String {
    String::from("mfa-callback-service")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.app_name, "mfa-callback-service");
        assert_eq!(config.otp.code_length, 6);
        assert_eq!(config.server.port, 8080);
        assert!(config.environment.is_development());
    }

    #[test]
    fn test_env_parse_falls_back_on_garbage() {
        std::env::set_var("MFA_SHARED_TEST_PARSE", "not-a-number");
        assert_eq!(env_parse("MFA_SHARED_TEST_PARSE", 42u64), 42);
        std::env::set_var("MFA_SHARED_TEST_PARSE", " 7 ");
        assert_eq!(env_parse("MFA_SHARED_TEST_PARSE", 42u64), 7);
        std::env::remove_var("MFA_SHARED_TEST_PARSE");
        assert_eq!(env_parse("MFA_SHARED_TEST_PARSE", 42u64), 42);
    }
}
