//! Ticket domain types: lifecycle status, postal address, validity window.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ticket lifecycle state.
///
/// `Created -> Expired` is the only transition. `Declined` is reserved for
/// rejected requests persisted as audit records and is never written by the
/// default creation path.
///
/// Wire/storage format: upper-case string (`"CREATED"`, `"EXPIRED"`, `"DECLINED"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TicketStatus {
    Created,
    Expired,
    Declined,
}

impl TicketStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Expired => "EXPIRED",
            Self::Declined => "DECLINED",
        }
    }

    /// `Expired` and `Declined` accept no further transitions.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Created)
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ticket status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for TicketStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(Self::Created),
            "EXPIRED" => Ok(Self::Expired),
            "DECLINED" => Ok(Self::Declined),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}

/// Postal address. Opaque strings; no geocoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub house_number: String,
    pub zip_code: String,
    pub city: String,
    pub country: String,
}

impl Address {
    /// All five fields are present (non-blank).
    pub fn is_complete(&self) -> bool {
        [
            &self.street,
            &self.house_number,
            &self.zip_code,
            &self.city,
            &self.country,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

/// Returned by [`ValidityWindow::new`] when `valid_from >= valid_to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("start must precede end")]
pub struct InvertedWindow;

/// Closed time interval `[valid_from, valid_to]` during which a ticket is active.
///
/// Invariant: `valid_from < valid_to`. Equal endpoints are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityWindow {
    valid_from: DateTime<Utc>,
    valid_to: DateTime<Utc>,
}

impl ValidityWindow {
    pub fn new(valid_from: DateTime<Utc>, valid_to: DateTime<Utc>) -> Result<Self, InvertedWindow> {
        if valid_from >= valid_to {
            return Err(InvertedWindow);
        }
        Ok(Self {
            valid_from,
            valid_to,
        })
    }

    pub fn valid_from(&self) -> DateTime<Utc> {
        self.valid_from
    }

    pub fn valid_to(&self) -> DateTime<Utc> {
        self.valid_to
    }

    /// Symmetric closed-interval intersection: `a.from <= b.to && b.from <= a.to`.
    ///
    /// Catches partial overlap from either side, containment in either
    /// direction, identical windows, and touching endpoints.
    pub fn overlaps(&self, other: &ValidityWindow) -> bool {
        self.valid_from <= other.valid_to && other.valid_from <= self.valid_to
    }

    /// `valid_to` is at or before `now`.
    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        self.valid_to <= now
    }
}
