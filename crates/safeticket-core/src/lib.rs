//! Service plumbing shared by SafeTicket binaries: error envelope, health
//! handlers, request-id middleware, serde helpers, tracing setup.

pub mod error;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
