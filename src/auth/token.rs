//! Stateless JWT authentication
//!
//! Login returns an HS256 token whose subject is the username. Protected
//! routes expect it in the `x-access-token` header. Nothing is stored server
//! side, so logout only acknowledges and the token lapses at `exp`.

use crate::core::auth::{AuthContext, AuthProvider, LoginGrant};
use crate::core::error::RecordError;
use anyhow::anyhow;
use async_trait::async_trait;
use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const TOKEN_HEADER: &str = "x-access-token";

/// JWT claims for access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (username)
    pub sub: String,

    /// Issued at timestamp (Unix epoch seconds)
    pub iat: i64,

    /// Expiration timestamp (Unix epoch seconds)
    pub exp: i64,
}

/// Token auth provider
#[derive(Clone)]
pub struct TokenAuthProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenAuthProvider {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Sign a token for a user
    pub fn issue(&self, username: &str) -> Result<String, RecordError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| anyhow!("Failed to sign token: {}", e).into())
    }

    /// Check signature and expiry, returning the claims
    pub fn verify(&self, token: &str) -> Result<TokenClaims, RecordError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| RecordError::unauthorized("Token is invalid!"))
    }
}

#[async_trait]
impl AuthProvider for TokenAuthProvider {
    fn name(&self) -> &'static str {
        "token"
    }

    fn rejection(&self) -> RecordError {
        RecordError::unauthorized("Token is missing!")
    }

    async fn authorize(&self, headers: &HeaderMap) -> Result<AuthContext, RecordError> {
        let Some(value) = headers.get(TOKEN_HEADER) else {
            return Ok(AuthContext::Anonymous);
        };

        let token = value
            .to_str()
            .map_err(|_| RecordError::unauthorized("Token is invalid!"))?;
        let claims = self.verify(token)?;

        Ok(AuthContext::user(claims.sub))
    }

    async fn login(&self, username: &str) -> Result<LoginGrant, RecordError> {
        Ok(LoginGrant {
            token: Some(self.issue(username)?),
            set_cookie: None,
        })
    }

    async fn logout(&self, _headers: &HeaderMap) -> Result<Option<String>, RecordError> {
        Ok(None)
    }
}
