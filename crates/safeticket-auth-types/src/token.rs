//! JWT identity-token validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "USE_ONLY_IN_TICKETING_SERVICE", test))]
use serde::Serialize;

use safeticket_domain::id::HashedIdentity;

/// Citizen identity extracted from a validated token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub hashed_identity: HashedIdentity,
    pub expires_at: u64,
}

/// Errors returned by [`validate_identity_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload shared by token issuance and validation.
///
/// # Fields
///
/// | Field | JWT claim | Rust type | Meaning |
/// |-------|-----------|-----------|---------|
/// | `sub` | `sub` | hex string | hashed identity, never the raw passport id |
/// | `iat` | `iat` | seconds since epoch | issued at |
/// | `exp` | `exp` | seconds since epoch | token expiration |
///
/// # Feature gate
///
/// [`Deserialize`] is always available. [`Serialize`] requires the
/// **`USE_ONLY_IN_TICKETING_SERVICE`** cargo feature; only the ticketing service
/// issues tokens.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "USE_ONLY_IN_TICKETING_SERVICE", test), derive(Serialize))]
pub struct IdentityClaims {
    /// Hashed identity.
    pub sub: String,
    /// Issued-at timestamp (seconds since UNIX epoch).
    pub iat: u64,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub exp: u64,
}

/// Decode and validate a JWT, returning raw claims.
///
/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
/// Default leeway = 60s.
fn decode_jwt(token: &str, secret: &str) -> Result<IdentityClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<IdentityClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_) => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate a bearer token, returning the identity it was issued for.
pub fn validate_identity_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let claims = decode_jwt(token, secret)?;
    let hashed_identity = HashedIdentity::new(claims.sub).map_err(|_| AuthError::Malformed)?;
    Ok(TokenInfo {
        hashed_identity,
        expires_at: claims.exp,
    })
}
