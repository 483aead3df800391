use anyhow::anyhow;
use chrono::{DateTime, Utc};

use safeticket_domain::id::{HashedIdentity, TicketId};
use safeticket_domain::ticket::{Address, TicketStatus, ValidityWindow};

use crate::domain::repository::{TicketRepository, VerificationCodeGenerator};
use crate::domain::types::{InsertOutcome, MAX_CODE_ATTEMPTS, Ticket};
use crate::error::TicketingError;

// ── CreateTicket ──────────────────────────────────────────────────────────────

pub struct CreateTicketInput {
    pub hashed_identity: HashedIdentity,
    pub reason: Option<String>,
    pub start_address: Address,
    pub end_address: Address,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
}

pub struct CreateTicketUseCase<R: TicketRepository, G: VerificationCodeGenerator> {
    pub tickets: R,
    pub codes: G,
}

impl<R: TicketRepository, G: VerificationCodeGenerator> CreateTicketUseCase<R, G> {
    /// Validate, reject overlaps with the identity's `CREATED` tickets, then
    /// persist a new `CREATED` ticket with a fresh verification code.
    ///
    /// Validation failures return before any store access.
    pub async fn execute(&self, input: CreateTicketInput) -> Result<Ticket, TicketingError> {
        let window = ValidityWindow::new(input.valid_from, input.valid_to)
            .map_err(|_| TicketingError::InvalidWindow)?;
        if !input.start_address.is_complete() || !input.end_address.is_complete() {
            return Err(TicketingError::MissingAddress);
        }
        let reason = input
            .reason
            .map(|r| r.trim().to_owned())
            .filter(|r| !r.is_empty());

        if self
            .tickets
            .count_overlapping(&input.hashed_identity, &window)
            .await?
            > 0
        {
            return Err(TicketingError::ConflictInTime);
        }

        let id = TicketId::generate();
        let created_at = Utc::now();
        for _ in 0..MAX_CODE_ATTEMPTS {
            let ticket = Ticket {
                id,
                hashed_identity: input.hashed_identity.clone(),
                reason: reason.clone(),
                start_address: input.start_address.clone(),
                end_address: input.end_address.clone(),
                window,
                status: TicketStatus::Created,
                verification_code: self.codes.generate().await?,
                created_at,
            };
            match self.tickets.insert_exclusive(&ticket).await? {
                InsertOutcome::Inserted => {
                    tracing::info!(ticket_id = %ticket.id, "ticket created");
                    return Ok(ticket);
                }
                InsertOutcome::Conflict => return Err(TicketingError::ConflictInTime),
                InsertOutcome::DuplicateCode => {
                    tracing::warn!(ticket_id = %ticket.id, "verification code collision, retrying");
                }
            }
        }
        Err(anyhow!("verification code collided {MAX_CODE_ATTEMPTS} times").into())
    }
}

// ── FindTicket ────────────────────────────────────────────────────────────────

pub struct FindTicketUseCase<R: TicketRepository> {
    pub tickets: R,
}

impl<R: TicketRepository> FindTicketUseCase<R> {
    /// `Ok(None)` when no ticket has this id.
    pub async fn execute(&self, id: TicketId) -> Result<Option<Ticket>, TicketingError> {
        self.tickets.find_by_id(id).await
    }
}

// ── RetrieveTicketsByIdentity ─────────────────────────────────────────────────

pub struct RetrieveTicketsUseCase<R: TicketRepository> {
    pub tickets: R,
}

impl<R: TicketRepository> RetrieveTicketsUseCase<R> {
    pub async fn execute(&self, identity: &HashedIdentity) -> Result<Vec<Ticket>, TicketingError> {
        self.tickets.list_by_identity(identity).await
    }
}

// ── InvalidateTicket ──────────────────────────────────────────────────────────

pub struct InvalidateTicketUseCase<R: TicketRepository> {
    pub tickets: R,
}

impl<R: TicketRepository> InvalidateTicketUseCase<R> {
    /// Force `CREATED -> EXPIRED`. Returns whether a ticket changed.
    pub async fn execute(&self, id: TicketId) -> Result<bool, TicketingError> {
        let changed = self.tickets.expire_by_id(id).await?;
        if changed {
            tracing::info!(ticket_id = %id, "ticket invalidated");
        }
        Ok(changed)
    }
}
