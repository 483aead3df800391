//! `Authorization: Bearer <jwt>` extractor.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::response::{IntoResponse, Response};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use http::StatusCode;
use http::request::Parts;

use safeticket_domain::id::HashedIdentity;

use crate::token::{AuthError, validate_identity_token};

/// Router state that knows the HMAC secret identity tokens are signed with.
pub trait JwtSecretProvider {
    fn jwt_secret(&self) -> &str;
}

/// Identity carried by a valid bearer token.
///
/// As `BearerIdentity` the header is required; as `Option<BearerIdentity>` a
/// missing header yields `None`, but a present-and-invalid token still rejects.
#[derive(Debug, Clone)]
pub struct BearerIdentity {
    pub hashed_identity: HashedIdentity,
    pub expires_at: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum BearerRejection {
    #[error("missing bearer token")]
    Missing,
    #[error("invalid token")]
    Invalid(#[from] AuthError),
}

impl IntoResponse for BearerRejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "kind": "INVALID_TOKEN",
            "message": self.to_string(),
        });
        (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
    }
}

fn extract(parts: &Parts, secret: &str) -> Result<Option<BearerIdentity>, BearerRejection> {
    let Some(Authorization(bearer)) = parts.headers.typed_get::<Authorization<Bearer>>() else {
        return Ok(None);
    };
    let info = validate_identity_token(bearer.token(), secret).inspect_err(|e| {
        tracing::debug!(error = %e, "bearer token rejected");
    })?;
    Ok(Some(BearerIdentity {
        hashed_identity: info.hashed_identity,
        expires_at: info.expires_at,
    }))
}

impl<S> FromRequestParts<S> for BearerIdentity
where
    S: JwtSecretProvider + Send + Sync,
{
    type Rejection = BearerRejection;

    // Validation is synchronous; return a 'static future so the borrow of
    // `parts` does not leak into it.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = extract(parts, state.jwt_secret());
        async move { result?.ok_or(BearerRejection::Missing) }
    }
}

impl<S> OptionalFromRequestParts<S> for BearerIdentity
where
    S: JwtSecretProvider + Send + Sync,
{
    type Rejection = BearerRejection;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Option<Self>, Self::Rejection>> + Send {
        let result = extract(parts, state.jwt_secret());
        async move { result }
    }
}
