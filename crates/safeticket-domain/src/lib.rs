//! Domain types shared across SafeTicket crates.
//!
//! Pure types with no framework dependencies.

pub mod id;
pub mod ticket;
