//! Mock identity tokens for tests.
//!
//! Mints HS256 tokens with the same claim layout the ticketing service issues,
//! so handlers behind `BearerIdentity` can be exercised without going through
//! `POST /api/v1/auth/token` first.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use jsonwebtoken::{EncodingKey, Header, encode};

/// Configurable identity encoded into test bearer tokens.
pub struct MockAuth {
    pub hashed_identity: String,
    pub secret: String,
    /// Token lifetime relative to now; negative values produce expired tokens.
    pub ttl_secs: i64,
}

impl MockAuth {
    pub fn new(hashed_identity: &str, secret: &str) -> Self {
        Self {
            hashed_identity: hashed_identity.to_owned(),
            secret: secret.to_owned(),
            ttl_secs: 600,
        }
    }

    /// Same identity, but the token expired an hour ago.
    pub fn expired(mut self) -> Self {
        self.ttl_secs = -3600;
        self
    }

    pub fn token(&self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64;
        let claims = serde_json::json!({
            "sub": self.hashed_identity,
            "iat": now,
            "exp": now + self.ttl_secs,
        });
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .unwrap()
    }

    /// `Authorization: Bearer <token>` header map.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token())).unwrap(),
        );
        map
    }
}
