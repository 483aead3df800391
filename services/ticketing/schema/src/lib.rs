//! sea-orm entities owned by the ticketing service.

pub mod counter_sequences;
pub mod tickets;
