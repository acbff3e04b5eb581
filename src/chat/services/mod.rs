//! Chat-facing services.

mod handler;

pub use handler::{ChatCommandHandler, MessageDisposition};
