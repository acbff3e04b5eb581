//! Adapter for the automation service HTTP API.
//!
//! [`StackStormClient`] implements the alias source and executor ports and
//! the [`Authenticator`] used at startup.

pub mod auth;
pub mod client;

pub use auth::{AuthError, AuthToken, Authenticator, Credentials, StartupPlan};
pub use client::{ClientSetupError, StackStormClient};

#[cfg(test)]
mod tests;
