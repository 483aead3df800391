//! Auth types shared across SafeTicket crates.
//!
//! Provides identity-token (JWT) validation and the `BearerIdentity` extractor.

pub mod bearer;
pub mod token;
