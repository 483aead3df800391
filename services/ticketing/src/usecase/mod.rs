pub mod expiry;
pub mod ticket;
pub mod token;
