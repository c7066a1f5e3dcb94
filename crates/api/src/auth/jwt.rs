//! Bearer tokens: HS256-signed JWTs that identify a user.
//!
//! Tokens carry identity only. Group membership can change while a token is
//! live, so the caller's role is looked up on every request instead.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use lemon_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload of an access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user's database id.
    pub sub: DbId,
    /// Username at issue time, for logs only.
    pub username: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl Claims {
    fn new(user_id: DbId, username: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            username: username.to_owned(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Signing secret and token lifetime.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
}

impl JwtConfig {
    /// Token lifetime in seconds, as reported to clients on login.
    pub fn expires_in_secs(&self) -> i64 {
        self.ttl().num_seconds()
    }

    fn ttl(&self) -> Duration {
        Duration::minutes(self.access_token_expiry_mins)
    }

    /// Sign a new access token for `user_id`.
    pub fn issue(&self, user_id: DbId, username: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims::new(user_id, username, self.ttl());
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    /// Check a token's signature and expiry and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
    }
}
