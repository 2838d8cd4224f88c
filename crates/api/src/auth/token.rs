//! Signed, time-limited access tokens backed by a session record.
//!
//! Tokens are HMAC-signed JWTs carrying a [`Claims`] payload. Issuing a token
//! also writes a session record keyed by the token string; a token only
//! reaches a caller once that write has succeeded.

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::session::{SessionStore, SessionStoreError};

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// The username the token was issued to.
    pub username: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4), so two tokens issued in the same
    /// second for the same user still differ.
    pub jti: String,
}

/// Configuration for token signing and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in minutes (default: 10).
    pub expiry_mins: i64,
}

/// Default token lifetime in minutes.
pub const DEFAULT_EXPIRY_MINS: i64 = 10;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var           | Required | Default |
    /// |-------------------|----------|---------|
    /// | `JWT_SECRET`      | **yes**  | --      |
    /// | `JWT_EXPIRY_MINS` | no       | `10`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let expiry_mins: i64 = std::env::var("JWT_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_EXPIRY_MINS must be a valid i64");
        assert!(expiry_mins > 0, "JWT_EXPIRY_MINS must be positive");

        Self {
            secret,
            expiry_mins,
        }
    }
}

/// Why a presented token was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Malformed, mis-signed, signed with a disallowed algorithm, or missing claims.
    #[error("invalid token")]
    Invalid,
    #[error("token expired")]
    Expired,
}

/// Why issuing a token failed. No token is handed out in either case.
#[derive(Debug, thiserror::Error)]
pub enum IssueError {
    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("failed to persist session: {0}")]
    SessionPersist(#[from] SessionStoreError),
}

/// A freshly issued token and the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

/// Issues and verifies tokens. Cheap to share behind an `Arc`.
pub struct TokenService {
    config: JwtConfig,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    store: Arc<dyn SessionStore>,
}

impl TokenService {
    pub fn new(config: JwtConfig, store: Arc<dyn SessionStore>) -> Self {
        let encoding = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding = DecodingKey::from_secret(config.secret.as_bytes());

        // Expiry is checked by hand so that `now == exp` already counts as
        // expired; the library only checks that `exp` is present.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            config,
            encoding,
            decoding,
            validation,
            store,
        }
    }

    /// Lifetime of newly issued tokens.
    pub fn ttl(&self) -> Duration {
        Duration::minutes(self.config.expiry_mins)
    }

    /// Sign a token for `username` and record its session.
    pub async fn issue(&self, username: &str) -> Result<IssuedToken, IssueError> {
        let now = Utc::now();
        let expires_at = now + self.ttl();

        let claims = Claims {
            username: username.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        self.store.put(&token, expires_at).await?;

        Ok(IssuedToken { token, claims })
    }

    /// Validate a token against the current time.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Validate a token as of `now` (Unix seconds).
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            }
        })?;

        if now >= data.claims.exp {
            return Err(TokenError::Expired);
        }
        Ok(data.claims)
    }
}
