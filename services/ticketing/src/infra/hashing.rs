use sha2::{Digest, Sha256};

use safeticket_domain::id::HashedIdentity;

use crate::domain::repository::IdentityHasher;
use crate::error::TicketingError;

/// `hex(sha256(salt || trim(raw)))`.
///
/// Same salt + same raw identity always yields the same digest, so tickets
/// created anonymously and via a bearer token land on one identity.
#[derive(Clone)]
pub struct Sha256IdentityHasher {
    pub salt: String,
}

impl IdentityHasher for Sha256IdentityHasher {
    fn hash(&self, raw: &str) -> Result<HashedIdentity, TicketingError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(TicketingError::MissingIdentity);
        }
        let mut hasher = Sha256::new();
        hasher.update(self.salt.as_bytes());
        hasher.update(raw.as_bytes());
        let digest = hex::encode(hasher.finalize());
        HashedIdentity::new(digest).map_err(|_| TicketingError::MissingIdentity)
    }
}
