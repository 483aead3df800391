use chrono::{DateTime, Utc};

use crate::domain::repository::TicketRepository;
use crate::error::TicketingError;

/// Bulk `CREATED -> EXPIRED` for tickets whose window has ended.
///
/// Set-based and idempotent: a second run right after the first matches
/// nothing the first already expired.
pub struct ExpireOverdueTicketsUseCase<R: TicketRepository> {
    pub tickets: R,
}

impl<R: TicketRepository> ExpireOverdueTicketsUseCase<R> {
    pub async fn execute(&self) -> Result<u64, TicketingError> {
        self.execute_at(Utc::now()).await
    }

    /// Expire against an explicit clock reading. Returns the number of tickets expired.
    pub async fn execute_at(&self, now: DateTime<Utc>) -> Result<u64, TicketingError> {
        let expired = self.tickets.expire_ended(now).await?;
        tracing::info!(expired, "expired overdue tickets");
        Ok(expired)
    }
}
