//! Chat surface of the relay.
//!
//! Incoming messages addressed to the bot are routed to help or to alias
//! resolution and dispatch; replies leave through the [`ports::ChatSink`]
//! port.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
