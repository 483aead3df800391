#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use safeticket_domain::id::{HashedIdentity, TicketId};
use safeticket_domain::ticket::ValidityWindow;

use crate::domain::types::{InsertOutcome, Ticket};
use crate::error::TicketingError;

/// Persistent ticket collection.
pub trait TicketRepository: Send + Sync {
    /// Count `CREATED` tickets of `identity` whose window intersects `window`
    /// (closed intervals, touching endpoints included).
    async fn count_overlapping(
        &self,
        identity: &HashedIdentity,
        window: &ValidityWindow,
    ) -> Result<u64, TicketingError>;

    /// Insert `ticket` unless an overlapping `CREATED` ticket for the same
    /// identity exists at write time. Serialized per identity.
    async fn insert_exclusive(&self, ticket: &Ticket) -> Result<InsertOutcome, TicketingError>;

    async fn find_by_id(&self, id: TicketId) -> Result<Option<Ticket>, TicketingError>;

    /// All tickets of `identity`, any status.
    async fn list_by_identity(
        &self,
        identity: &HashedIdentity,
    ) -> Result<Vec<Ticket>, TicketingError>;

    /// Set-based `CREATED -> EXPIRED` for every ticket with `valid_to <= now`.
    /// Returns the number of tickets transitioned.
    async fn expire_ended(&self, now: DateTime<Utc>) -> Result<u64, TicketingError>;

    /// `CREATED -> EXPIRED` for one ticket regardless of its window.
    /// Returns `false` if absent or already terminal.
    async fn expire_by_id(&self, id: TicketId) -> Result<bool, TicketingError>;
}

/// Shared named counters with atomic increment-and-fetch.
pub trait CounterPort: Send + Sync {
    /// Advance `sequence` and return the new value. The first call on a fresh
    /// sequence returns [`MIN_COUNTER_VALUE`](crate::domain::types::MIN_COUNTER_VALUE).
    async fn increment_and_fetch(&self, sequence: &str) -> Result<i64, TicketingError>;
}

/// Source of per-ticket verification codes.
pub trait VerificationCodeGenerator: Send + Sync {
    async fn generate(&self) -> Result<String, TicketingError>;
}

/// Deterministic one-way mapping from raw identity to [`HashedIdentity`].
pub trait IdentityHasher: Send + Sync {
    /// Fails with [`TicketingError::MissingIdentity`] on blank input.
    fn hash(&self, raw: &str) -> Result<HashedIdentity, TicketingError>;
}
