//! Chat message domain types.

mod mention;
mod message;

pub use mention::addressed_text;
pub use message::{IncomingMessage, OutgoingMessage, Recipient};
