use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use safeticket_auth_types::bearer::BearerIdentity;
use safeticket_core::serde::to_rfc3339_ms;
use safeticket_domain::id::{HashedIdentity, TicketId};
use safeticket_domain::ticket::{Address, TicketStatus};

use crate::domain::repository::IdentityHasher;
use crate::domain::types::Ticket;
use crate::error::TicketingError;
use crate::state::AppState;
use crate::usecase::ticket::{
    CreateTicketInput, CreateTicketUseCase, FindTicketUseCase, InvalidateTicketUseCase,
    RetrieveTicketsUseCase,
};

// ── Response shape ────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct TicketResponse {
    pub ticket_id: TicketId,
    pub hashed_identity: HashedIdentity,
    pub reason: Option<String>,
    pub start_address: Address,
    pub end_address: Address,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub valid_from: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub valid_to: DateTime<Utc>,
    pub status: TicketStatus,
    pub verification_code: String,
}

impl From<Ticket> for TicketResponse {
    fn from(t: Ticket) -> Self {
        Self {
            ticket_id: t.id,
            hashed_identity: t.hashed_identity,
            reason: t.reason,
            start_address: t.start_address,
            end_address: t.end_address,
            valid_from: t.window.valid_from(),
            valid_to: t.window.valid_to(),
            status: t.status,
            verification_code: t.verification_code,
        }
    }
}

fn parse_ticket_id(raw: &str) -> Result<TicketId, TicketingError> {
    raw.parse().map_err(|_| TicketingError::InvalidTicketId)
}

// ── POST /api/v1/tickets ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateTicketRequest {
    /// Raw identity; hashed before anything else sees it. Falls back to the
    /// bearer token's identity when absent.
    pub passport_id: Option<String>,
    pub reason: Option<String>,
    pub start_address: Option<AddressBody>,
    pub end_address: Option<AddressBody>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_to: Option<DateTime<Utc>>,
}

/// Address as submitted. Absent keys deserialize as blank so the use case
/// reports them as `MISSING_ADDRESS` rather than a body rejection.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct AddressBody {
    pub street: String,
    pub house_number: String,
    pub zip_code: String,
    pub city: String,
    pub country: String,
}

impl From<AddressBody> for Address {
    fn from(a: AddressBody) -> Self {
        Self {
            street: a.street,
            house_number: a.house_number,
            zip_code: a.zip_code,
            city: a.city,
            country: a.country,
        }
    }
}

pub async fn create_ticket(
    State(state): State<AppState>,
    bearer: Option<BearerIdentity>,
    WithRejection(Json(body), _): WithRejection<Json<CreateTicketRequest>, TicketingError>,
) -> Result<impl IntoResponse, TicketingError> {
    let hashed_identity = match (body.passport_id.as_deref(), bearer) {
        (Some(raw), _) => state.identity_hasher().hash(raw)?,
        (None, Some(bearer)) => bearer.hashed_identity,
        (None, None) => return Err(TicketingError::MissingIdentity),
    };
    let (Some(start_address), Some(end_address)) = (body.start_address, body.end_address) else {
        return Err(TicketingError::MissingAddress);
    };
    let (Some(valid_from), Some(valid_to)) = (body.valid_from, body.valid_to) else {
        return Err(TicketingError::InvalidWindow);
    };

    let usecase = CreateTicketUseCase {
        tickets: state.ticket_repo(),
        codes: state.code_generator(),
    };
    let ticket = usecase
        .execute(CreateTicketInput {
            hashed_identity,
            reason: body.reason,
            start_address: start_address.into(),
            end_address: end_address.into(),
            valid_from,
            valid_to,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(TicketResponse::from(ticket))))
}

// ── GET /api/v1/tickets/{ticket_id} ───────────────────────────────────────────

pub async fn get_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<String>,
) -> Result<Json<TicketResponse>, TicketingError> {
    let id = parse_ticket_id(&ticket_id)?;
    let usecase = FindTicketUseCase {
        tickets: state.ticket_repo(),
    };
    let ticket = usecase
        .execute(id)
        .await?
        .ok_or(TicketingError::TicketNotFound)?;
    Ok(Json(ticket.into()))
}

// ── POST /api/v1/tickets/identity ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RetrieveTicketsRequest {
    #[serde(default)]
    pub hashed_identity: String,
}

pub async fn retrieve_tickets(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<RetrieveTicketsRequest>, TicketingError>,
) -> Result<Json<Vec<TicketResponse>>, TicketingError> {
    let identity =
        HashedIdentity::new(body.hashed_identity).map_err(|_| TicketingError::MissingIdentity)?;
    list_for(&state, &identity).await
}

// ── GET /api/v1/tickets/@me ───────────────────────────────────────────────────

pub async fn my_tickets(
    State(state): State<AppState>,
    bearer: BearerIdentity,
) -> Result<Json<Vec<TicketResponse>>, TicketingError> {
    list_for(&state, &bearer.hashed_identity).await
}

async fn list_for(
    state: &AppState,
    identity: &HashedIdentity,
) -> Result<Json<Vec<TicketResponse>>, TicketingError> {
    let usecase = RetrieveTicketsUseCase {
        tickets: state.ticket_repo(),
    };
    let tickets = usecase.execute(identity).await?;
    Ok(Json(tickets.into_iter().map(TicketResponse::from).collect()))
}

// ── DELETE /api/v1/tickets/{ticket_id} ────────────────────────────────────────

pub async fn invalidate_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<String>,
) -> Result<StatusCode, TicketingError> {
    let id = parse_ticket_id(&ticket_id)?;
    let usecase = InvalidateTicketUseCase {
        tickets: state.ticket_repo(),
    };
    if usecase.execute(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(TicketingError::TicketNotFound)
    }
}
