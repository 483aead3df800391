use sea_orm::DatabaseConnection;

use safeticket_auth_types::bearer::JwtSecretProvider;

use crate::domain::types::CodeStrategy;
use crate::infra::codes::ConfiguredCodes;
use crate::infra::db::{DbCounter, DbTicketRepository};
use crate::infra::hashing::Sha256IdentityHasher;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub identity_salt: String,
    pub identity_token_ttl_secs: u64,
    pub code_strategy: CodeStrategy,
}

impl AppState {
    pub fn ticket_repo(&self) -> DbTicketRepository {
        DbTicketRepository {
            db: self.db.clone(),
        }
    }

    pub fn code_generator(&self) -> ConfiguredCodes<DbCounter> {
        ConfiguredCodes::new(
            self.code_strategy,
            DbCounter {
                db: self.db.clone(),
            },
        )
    }

    pub fn identity_hasher(&self) -> Sha256IdentityHasher {
        Sha256IdentityHasher {
            salt: self.identity_salt.clone(),
        }
    }
}

impl JwtSecretProvider for AppState {
    fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }
}
