use std::time::Duration;

use chrono::{DateTime, NaiveTime, Utc};

use crate::domain::repository::TicketRepository;
use crate::usecase::expiry::ExpireOverdueTicketsUseCase;

/// Daily expiry trigger.
///
/// A single task sleeps until the next `run_at` (UTC) and runs the sweep
/// inline, so two sweeps never overlap: a sweep that overruns the next
/// scheduled time pushes that tick to the following day.
pub struct ExpirySweeper<R: TicketRepository> {
    pub usecase: ExpireOverdueTicketsUseCase<R>,
    pub run_at: NaiveTime,
}

impl<R: TicketRepository> ExpirySweeper<R> {
    pub async fn run(self) {
        tracing::info!(run_at = %self.run_at, "expiry sweeper started");
        loop {
            tokio::time::sleep(delay_until_next_run(Utc::now(), self.run_at)).await;
            self.sweep_once().await;
        }
    }

    /// One sweep. Failures are logged and the next day's run proceeds as usual.
    pub async fn sweep_once(&self) {
        if let Err(e) = self.usecase.execute().await {
            tracing::error!(error = %e, "expiry sweep failed");
        }
    }
}

/// Time from `now` until the next occurrence of `run_at` (today if still
/// ahead, otherwise tomorrow).
pub fn delay_until_next_run(now: DateTime<Utc>, run_at: NaiveTime) -> Duration {
    let today = now.date_naive().and_time(run_at).and_utc();
    let next = if today > now {
        today
    } else {
        today + chrono::Duration::days(1)
    };
    (next - now).to_std().unwrap_or_default()
}
