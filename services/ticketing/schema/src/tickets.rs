use sea_orm::entity::prelude::*;

/// Movement permit issued to a hashed identity.
///
/// `status` holds `CREATED` | `EXPIRED` | `DECLINED`. Addresses are stored as
/// JSON objects `{ street, house_number, zip_code, city, country }`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub hashed_identity: String,
    pub reason: Option<String>,
    pub start_address: Json,
    pub end_address: Json,
    pub valid_from: chrono::DateTime<chrono::Utc>,
    pub valid_to: chrono::DateTime<chrono::Utc>,
    pub status: String,
    #[sea_orm(unique)]
    pub verification_code: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
