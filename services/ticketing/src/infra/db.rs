use anyhow::{Context as _, anyhow};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbBackend, DbErr, EntityTrait, FromQueryResult, Insert, PaginatorTrait, QueryFilter,
    QueryOrder, Select, Statement, TransactionTrait, UpdateMany,
};

use safeticket_domain::id::{HashedIdentity, TicketId};
use safeticket_domain::ticket::{Address, TicketStatus, ValidityWindow};
use safeticket_ticketing_schema::tickets;

use crate::domain::repository::{CounterPort, TicketRepository};
use crate::domain::types::{InsertOutcome, MIN_COUNTER_VALUE, Ticket};
use crate::error::TicketingError;

// ── Ticket repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTicketRepository {
    pub db: DatabaseConnection,
}

impl TicketRepository for DbTicketRepository {
    async fn count_overlapping(
        &self,
        identity: &HashedIdentity,
        window: &ValidityWindow,
    ) -> Result<u64, TicketingError> {
        let count = overlapping_query(identity, window)
            .count(&self.db)
            .await
            .context("count overlapping tickets")?;
        Ok(count)
    }

    async fn insert_exclusive(&self, ticket: &Ticket) -> Result<InsertOutcome, TicketingError> {
        let outcome = self
            .db
            .transaction::<_, InsertOutcome, DbErr>(|txn| {
                let ticket = ticket.clone();
                Box::pin(async move {
                    lock_identity(txn, &ticket.hashed_identity).await?;
                    if overlapping_query(&ticket.hashed_identity, &ticket.window)
                        .count(txn)
                        .await?
                        > 0
                    {
                        return Ok(InsertOutcome::Conflict);
                    }
                    // Zero rows means another ticket already holds this code.
                    let inserted = insert_query(&ticket)?.exec_without_returning(txn).await?;
                    if inserted == 0 {
                        return Ok(InsertOutcome::DuplicateCode);
                    }
                    Ok(InsertOutcome::Inserted)
                })
            })
            .await
            .context("insert ticket")?;
        Ok(outcome)
    }

    async fn find_by_id(&self, id: TicketId) -> Result<Option<Ticket>, TicketingError> {
        let model = tickets::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find ticket by id")?;
        model.map(ticket_from_model).transpose()
    }

    async fn list_by_identity(
        &self,
        identity: &HashedIdentity,
    ) -> Result<Vec<Ticket>, TicketingError> {
        let models = tickets::Entity::find()
            .filter(tickets::Column::HashedIdentity.eq(identity.as_str()))
            .order_by_asc(tickets::Column::ValidFrom)
            .all(&self.db)
            .await
            .context("list tickets by identity")?;
        models.into_iter().map(ticket_from_model).collect()
    }

    async fn expire_ended(&self, now: DateTime<Utc>) -> Result<u64, TicketingError> {
        let res = expire_ended_query(now)
            .exec(&self.db)
            .await
            .context("expire ended tickets")?;
        Ok(res.rows_affected)
    }

    async fn expire_by_id(&self, id: TicketId) -> Result<bool, TicketingError> {
        let res = expire_by_id_query(id)
            .exec(&self.db)
            .await
            .context("expire ticket by id")?;
        Ok(res.rows_affected > 0)
    }
}

/// `CREATED` tickets of `identity` whose closed interval intersects `window`:
/// `a.from <= b.to AND b.from <= a.to`.
fn overlapping_query(identity: &HashedIdentity, window: &ValidityWindow) -> Select<tickets::Entity> {
    tickets::Entity::find()
        .filter(tickets::Column::HashedIdentity.eq(identity.as_str()))
        .filter(tickets::Column::Status.eq(TicketStatus::Created.as_str()))
        .filter(tickets::Column::ValidFrom.lte(window.valid_to()))
        .filter(tickets::Column::ValidTo.gte(window.valid_from()))
}

fn expire_ended_query(now: DateTime<Utc>) -> UpdateMany<tickets::Entity> {
    tickets::Entity::update_many()
        .col_expr(
            tickets::Column::Status,
            Expr::value(TicketStatus::Expired.as_str()),
        )
        .filter(tickets::Column::Status.eq(TicketStatus::Created.as_str()))
        .filter(tickets::Column::ValidTo.lte(now))
}

fn expire_by_id_query(id: TicketId) -> UpdateMany<tickets::Entity> {
    tickets::Entity::update_many()
        .col_expr(
            tickets::Column::Status,
            Expr::value(TicketStatus::Expired.as_str()),
        )
        .filter(tickets::Column::Id.eq(id.0))
        .filter(tickets::Column::Status.eq(TicketStatus::Created.as_str()))
}

/// Serialize writers of the same identity until the transaction ends.
async fn lock_identity(txn: &DatabaseTransaction, identity: &HashedIdentity) -> Result<(), DbErr> {
    txn.execute(Statement::from_sql_and_values(
        DbBackend::Postgres,
        "SELECT pg_advisory_xact_lock(hashtext($1))",
        [identity.as_str().into()],
    ))
    .await?;
    Ok(())
}

fn insert_query(ticket: &Ticket) -> Result<Insert<tickets::ActiveModel>, DbErr> {
    let start_address = serde_json::to_value(&ticket.start_address)
        .map_err(|e| DbErr::Custom(format!("encode start address: {e}")))?;
    let end_address = serde_json::to_value(&ticket.end_address)
        .map_err(|e| DbErr::Custom(format!("encode end address: {e}")))?;
    let model = tickets::ActiveModel {
        id: Set(ticket.id.0),
        hashed_identity: Set(ticket.hashed_identity.as_str().to_owned()),
        reason: Set(ticket.reason.clone()),
        start_address: Set(start_address),
        end_address: Set(end_address),
        valid_from: Set(ticket.window.valid_from()),
        valid_to: Set(ticket.window.valid_to()),
        status: Set(ticket.status.as_str().to_owned()),
        verification_code: Set(ticket.verification_code.clone()),
        created_at: Set(ticket.created_at),
    };
    Ok(tickets::Entity::insert(model).on_conflict(
        OnConflict::column(tickets::Column::VerificationCode)
            .do_nothing()
            .to_owned(),
    ))
}

fn ticket_from_model(model: tickets::Model) -> Result<Ticket, TicketingError> {
    let hashed_identity = HashedIdentity::new(model.hashed_identity)
        .map_err(|_| anyhow!("ticket {} has empty identity", model.id))?;
    let start_address: Address =
        serde_json::from_value(model.start_address).context("decode start address")?;
    let end_address: Address =
        serde_json::from_value(model.end_address).context("decode end address")?;
    let window = ValidityWindow::new(model.valid_from, model.valid_to)
        .with_context(|| format!("ticket {} window", model.id))?;
    let status: TicketStatus = model
        .status
        .parse()
        .with_context(|| format!("ticket {} status", model.id))?;
    Ok(Ticket {
        id: TicketId(model.id),
        hashed_identity,
        reason: model.reason,
        start_address,
        end_address,
        window,
        status,
        verification_code: model.verification_code,
        created_at: model.created_at,
    })
}

// ── Counter ───────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCounter {
    pub db: DatabaseConnection,
}

#[derive(Debug, FromQueryResult)]
struct SeqRow {
    seq: i64,
}

/// Creates the sequence at `MIN_COUNTER_VALUE` on first use, otherwise bumps it.
fn increment_statement(sequence: &str) -> Statement {
    Statement::from_sql_and_values(
        DbBackend::Postgres,
        "INSERT INTO counter_sequences (id, seq) VALUES ($1, $2) \
         ON CONFLICT (id) DO UPDATE SET seq = counter_sequences.seq + 1 \
         RETURNING seq",
        [sequence.into(), MIN_COUNTER_VALUE.into()],
    )
}

impl CounterPort for DbCounter {
    async fn increment_and_fetch(&self, sequence: &str) -> Result<i64, TicketingError> {
        let row = SeqRow::find_by_statement(increment_statement(sequence))
            .one(&self.db)
            .await
            .context("increment counter")?
            .ok_or_else(|| anyhow!("counter {sequence} returned no row"))?;
        Ok(row.seq)
    }
}
