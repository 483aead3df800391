use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};

use safeticket_auth_types::token::IdentityClaims;
use safeticket_domain::id::HashedIdentity;

use crate::domain::repository::IdentityHasher;
use crate::error::TicketingError;

/// Sign an HS256 identity token for `identity`. Returns `(token, exp)`.
pub fn issue_identity_token(
    identity: &HashedIdentity,
    secret: &str,
    ttl_secs: u64,
) -> Result<(String, u64), TicketingError> {
    let iat = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
    let exp = iat + ttl_secs;
    let claims = IdentityClaims {
        sub: identity.as_str().to_owned(),
        iat,
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TicketingError::Internal(e.into()))?;
    Ok((token, exp))
}

// ── IssueToken ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct IssueTokenOutput {
    pub hashed_identity: HashedIdentity,
    pub token: String,
    pub expires_at: u64,
}

/// Hash a raw passport id and mint a bearer token for the digest.
///
/// The raw value is dropped here; only the digest is embedded in the token.
pub struct IssueTokenUseCase<H: IdentityHasher> {
    pub hasher: H,
    pub jwt_secret: String,
    pub ttl_secs: u64,
}

impl<H: IdentityHasher> IssueTokenUseCase<H> {
    pub fn execute(&self, passport_id: &str) -> Result<IssueTokenOutput, TicketingError> {
        let hashed_identity = self.hasher.hash(passport_id)?;
        let (token, expires_at) =
            issue_identity_token(&hashed_identity, &self.jwt_secret, self.ttl_secs)?;
        Ok(IssueTokenOutput {
            hashed_identity,
            token,
            expires_at,
        })
    }
}
