//! Test utilities for SafeTicket services.
//!
//! Import in `#[cfg(test)]` blocks and `tests/` only, never in production code.

pub mod auth;
