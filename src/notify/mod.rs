//! Result notifications from the automation service.
//!
//! Execution results arrive on an HTTP webhook, are rendered as chat text
//! and posted to the user or channel they name.

pub mod adapters;
pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
