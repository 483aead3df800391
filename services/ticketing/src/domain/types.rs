use std::str::FromStr;

use chrono::{DateTime, Utc};

use safeticket_domain::id::{HashedIdentity, TicketId};
use safeticket_domain::ticket::{Address, TicketStatus, ValidityWindow};

/// A persisted movement permit.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub id: TicketId,
    pub hashed_identity: HashedIdentity,
    pub reason: Option<String>,
    pub start_address: Address,
    pub end_address: Address,
    pub window: ValidityWindow,
    pub status: TicketStatus,
    /// Unique across the store, assigned once at creation.
    pub verification_code: String,
    pub created_at: DateTime<Utc>,
}

/// Result of an insert that re-checks the overlap invariant under a
/// per-identity lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// Another `CREATED` ticket for the same identity committed an overlapping
    /// window between the pre-check and the insert.
    Conflict,
    /// The verification code is already taken.
    DuplicateCode,
}

/// How verification codes are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeStrategy {
    /// Two speakable letters + global counter, e.g. `GD10042`.
    #[default]
    Sequential,
    /// Nine characters from an unambiguous base-31 alphabet, e.g. `k7pq3xmz2`.
    Random,
}

impl FromStr for CodeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "random" => Ok(Self::Random),
            other => Err(format!("unknown verification code strategy: {other}")),
        }
    }
}

/// Name of the counter sequence backing sequential verification codes.
pub const VERIFICATION_CODE_SEQUENCE: &str = "ticket_verification_code";

/// First value handed out by a fresh counter sequence.
pub const MIN_COUNTER_VALUE: i64 = 10_000;

/// Greek-alphabet initials: Alpha, Beta, Gamma, Delta, Epsilon, Sigma.
pub const SPEAKABLE_LETTERS: [char; 6] = ['A', 'B', 'G', 'D', 'E', 'S'];

/// Letters prefixed to the counter value.
pub const SPEAKABLE_PREFIX_LEN: usize = 2;

/// Digits and lowercase letters without `0 1 i l o`.
///
/// 31^9 ≈ 2.6e13 codes; ≈ 5e-5 collision probability over 50 000 tickets.
pub const SHORT_CODE_ALPHABET: &[u8] = b"23456789abcdefghjkmnpqrstuvwxyz";

/// Random short code length in characters.
pub const SHORT_CODE_LEN: usize = 9;

/// Fresh codes tried before a creation gives up on a verification-code collision.
pub const MAX_CODE_ATTEMPTS: usize = 3;
