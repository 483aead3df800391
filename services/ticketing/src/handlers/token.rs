use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use safeticket_auth_types::bearer::BearerIdentity;
use safeticket_domain::id::HashedIdentity;

use crate::error::TicketingError;
use crate::state::AppState;
use crate::usecase::token::IssueTokenUseCase;

// ── POST /api/v1/auth/token ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateTokenRequest {
    #[serde(default)]
    pub passport_id: String,
}

#[derive(Serialize)]
pub struct JwtPayload {
    pub hashed_identity: HashedIdentity,
}

#[derive(Serialize)]
pub struct CreateTokenResponse {
    pub token: String,
    pub jwt_payload: JwtPayload,
    pub expires_at: u64,
}

pub async fn create_token(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<CreateTokenRequest>, TicketingError>,
) -> Result<impl IntoResponse, TicketingError> {
    let usecase = IssueTokenUseCase {
        hasher: state.identity_hasher(),
        jwt_secret: state.jwt_secret.clone(),
        ttl_secs: state.identity_token_ttl_secs,
    };
    let out = usecase.execute(&body.passport_id)?;

    let resp = CreateTokenResponse {
        token: out.token,
        jwt_payload: JwtPayload {
            hashed_identity: out.hashed_identity,
        },
        expires_at: out.expires_at,
    };
    Ok((StatusCode::CREATED, Json(resp)))
}

// ── GET /api/v1/auth/token ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CheckTokenResponse {
    pub hashed_identity: HashedIdentity,
    pub expires_at: u64,
}

pub async fn check_token(bearer: BearerIdentity) -> Json<CheckTokenResponse> {
    Json(CheckTokenResponse {
        hashed_identity: bearer.hashed_identity,
        expires_at: bearer.expires_at,
    })
}
