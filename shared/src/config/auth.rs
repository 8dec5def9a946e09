//! Authentication configuration
//!
//! The service does not mint tokens. It only verifies bearer tokens issued by
//! the identity provider and takes the `sub` claim as the identity a passcode
//! is bound to.

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT verification configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared secret used to verify HMAC-signed tokens
    pub secret: String,

    /// Expected `iss` claim, if any
    #[serde(default)]
    pub issuer: Option<String>,

    /// Expected `aud` claim, if any
    #[serde(default)]
    pub audience: Option<String>,

    /// Algorithm for JWT verification (HS256, HS384 or HS512)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Clock skew tolerance in seconds for `exp`/`nbf`
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            issuer: None,
            audience: None,
            algorithm: default_algorithm(),
            leeway_seconds: default_leeway(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Require a specific issuer
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Require a specific audience
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = JwtConfig::default();
        Self {
            jwt: JwtConfig {
                secret: std::env::var("JWT_SECRET").unwrap_or(defaults.secret),
                issuer: std::env::var("JWT_ISSUER").ok().filter(|s| !s.is_empty()),
                audience: std::env::var("JWT_AUDIENCE").ok().filter(|s| !s.is_empty()),
                algorithm: std::env::var("JWT_ALGORITHM").unwrap_or(defaults.algorithm),
                leeway_seconds: super::env_parse("JWT_LEEWAY_SECONDS", defaults.leeway_seconds),
            },
        }
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_leeway() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.algorithm, "HS256");
        assert_eq!(config.leeway_seconds, 30);
        assert!(config.issuer.is_none());
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_issuer("https://idp.example.com")
            .with_audience("mfa");

        assert_eq!(config.issuer.as_deref(), Some("https://idp.example.com"));
        assert_eq!(config.audience.as_deref(), Some("mfa"));
        assert!(!config.is_using_default_secret());
    }
}
