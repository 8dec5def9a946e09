//! JWT authentication middleware for protecting API endpoints.
//!
//! This middleware extracts the bearer token from the Authorization header,
//! verifies it, and injects the caller's identity into the request. The
//! identity is the token's `sub` claim; passcodes are bound to it.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use mfa_shared::config::JwtConfig;

use crate::handlers::ApiError;

/// Claims read from an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated identity
    pub sub: String,
    /// Expiration time (seconds since epoch)
    pub exp: i64,
    /// Issued at (seconds since epoch)
    #[serde(default)]
    pub iat: Option<i64>,
    /// Token id
    #[serde(default)]
    pub jti: Option<String>,
}

/// Authentication context injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Identity taken from the `sub` claim
    pub identity: String,
    /// JWT ID for tracking, if the issuer sets one
    pub jti: Option<String>,
}

impl AuthContext {
    /// Creates a new authentication context from JWT claims
    pub fn from_claims(claims: Claims) -> Result<Self, String> {
        if claims.sub.trim().is_empty() {
            return Err("token subject is empty".to_string());
        }
        Ok(Self {
            identity: claims.sub,
            jti: claims.jti,
        })
    }
}

/// Verifies HMAC-signed bearer tokens
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    /// Build a verifier from configuration
    ///
    /// Only the HMAC family is accepted since verification uses a shared
    /// secret.
    pub fn new(config: &JwtConfig) -> Result<Self, String> {
        let algorithm = match config.algorithm.to_uppercase().as_str() {
            "HS256" => Algorithm::HS256,
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            other => return Err(format!("Unsupported JWT algorithm: {}", other)),
        };

        let mut validation = Validation::new(algorithm);
        validation.leeway = config.leeway_seconds;
        validation.set_required_spec_claims(&["exp", "sub"]);
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }
        match &config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Ok(Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        })
    }

    /// Verify a token and extract the caller's identity
    pub fn verify(&self, token: &str) -> Result<AuthContext, String> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => "token expired".to_string(),
                ErrorKind::InvalidSignature => "invalid token signature".to_string(),
                ErrorKind::InvalidIssuer => "invalid token issuer".to_string(),
                ErrorKind::InvalidAudience => "invalid token audience".to_string(),
                _ => "invalid token".to_string(),
            })?;

        AuthContext::from_claims(token_data.claims)
    }
}

/// JWT authentication middleware factory
pub struct JwtAuth {
    verifier: Arc<JwtVerifier>,
}

impl JwtAuth {
    /// Creates a new JWT authentication middleware
    pub fn new(verifier: Arc<JwtVerifier>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            verifier: Arc::clone(&self.verifier),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    verifier: Arc<JwtVerifier>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verifier = Arc::clone(&self.verifier);

        Box::pin(async move {
            let auth_context = match extract_bearer_token(&req) {
                Some(token) => verifier.verify(&token),
                None => Err("missing or invalid Authorization header".to_string()),
            };

            match auth_context {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                Err(reason) => {
                    log::warn!("Rejected request to {}: {}", req.path(), reason);
                    let response = ApiError::Unauthorized(reason).error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result: Result<Self, Self::Error> = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("authentication required".to_string()).into());

        ready(result)
    }
}
