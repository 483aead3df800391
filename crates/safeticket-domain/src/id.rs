//! Newtype wrappers for domain identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies a ticket. Assigned by the service at creation and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketId(pub Uuid);

impl TicketId {
    /// Fresh time-ordered id.
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TicketId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// One-way digest of a citizen's raw identity (passport id).
///
/// The raw value never leaves the hasher; this digest is the only identity key
/// that is stored, compared, or embedded in tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashedIdentity(String);

/// Returned by [`HashedIdentity::new`] for an empty digest.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("hashed identity must not be empty")]
pub struct EmptyIdentity;

impl HashedIdentity {
    pub fn new(digest: impl Into<String>) -> Result<Self, EmptyIdentity> {
        let digest = digest.into();
        if digest.trim().is_empty() {
            return Err(EmptyIdentity);
        }
        Ok(Self(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HashedIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
