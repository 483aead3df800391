use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tickets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tickets::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Tickets::HashedIdentity).string().not_null())
                    .col(ColumnDef::new(Tickets::Reason).text())
                    .col(ColumnDef::new(Tickets::StartAddress).json_binary().not_null())
                    .col(ColumnDef::new(Tickets::EndAddress).json_binary().not_null())
                    .col(
                        ColumnDef::new(Tickets::ValidFrom)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tickets::ValidTo)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Tickets::Status).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Tickets::VerificationCode)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Tickets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Overlap pre-check: identity + window range scan.
        manager
            .create_index(
                Index::create()
                    .table(Tickets::Table)
                    .col(Tickets::HashedIdentity)
                    .col(Tickets::ValidFrom)
                    .col(Tickets::ValidTo)
                    .name("idx_tickets_identity_window")
                    .to_owned(),
            )
            .await?;

        // Expiry sweep: status = CREATED AND valid_to <= now.
        manager
            .create_index(
                Index::create()
                    .table(Tickets::Table)
                    .col(Tickets::Status)
                    .col(Tickets::ValidTo)
                    .name("idx_tickets_status_valid_to")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tickets::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Tickets {
    Table,
    Id,
    HashedIdentity,
    Reason,
    StartAddress,
    EndAddress,
    ValidFrom,
    ValidTo,
    Status,
    VerificationCode,
    CreatedAt,
}
