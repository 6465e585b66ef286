use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ADMIN_ROLE: &str = "admin";
pub const USER_ROLE: &str = "user";

/// Default lifetime of an issued token.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub role: String,
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
}

impl Claims {
    pub fn new(role: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            role: role.into(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid JWT secret")]
    InvalidSecret,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    Expired,
}

/// Issue a token embedding `role` that expires 24 hours from now.
pub fn issue(role: &str, secret: &[u8]) -> Result<String, AuthError> {
    issue_with_ttl(role, secret, Duration::hours(DEFAULT_TOKEN_TTL_HOURS))
}

pub fn issue_with_ttl(role: &str, secret: &[u8], ttl: Duration) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::InvalidSecret);
    }

    let claims = Claims::new(role, ttl);
    encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret))
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

/// Check signature and expiry, returning the embedded role.
pub fn verify(token: &str, secret: &[u8]) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::InvalidSecret);
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims.role)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::InvalidToken(e.to_string()),
        })
}

pub fn is_authenticated(token: &str, secret: &[u8]) -> bool {
    verify(token, secret).is_ok()
}

pub fn has_role(token: &str, role: &str, secret: &[u8]) -> bool {
    matches!(verify(token, secret), Ok(actual) if actual == role)
}

/// Token operations bound to the application's signing secret.
#[derive(Clone)]
pub struct TokenService {
    secret: Vec<u8>,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: impl Into<Vec<u8>>, ttl_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            ttl: Duration::hours(ttl_hours as i64),
        }
    }

    pub fn issue(&self, role: &str) -> Result<String, AuthError> {
        issue_with_ttl(role, &self.secret, self.ttl)
    }

    pub fn verify(&self, token: &str) -> Result<String, AuthError> {
        verify(token, &self.secret)
    }

    pub fn is_authenticated(&self, token: &str) -> bool {
        is_authenticated(token, &self.secret)
    }

    pub fn has_role(&self, token: &str, role: &str) -> bool {
        has_role(token, role, &self.secret)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"<redacted>")
            .field("ttl_hours", &self.ttl.num_hours())
            .finish()
    }
}
