//! Command alias matching and dispatch.
//!
//! Aliases advertised by the automation service are compiled into
//! recognizers, published as immutable registry snapshots, matched against
//! chat text and dispatched back to the service for execution. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
