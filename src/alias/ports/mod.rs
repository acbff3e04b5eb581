//! Port contracts for alias listing and execution.
//!
//! Ports define transport-agnostic interfaces used by the refresher and the
//! dispatcher.

mod executor;
mod source;

pub use executor::{AliasExecutor, ExecutionResponse, ExecutorError, ExecutorResult};
pub use source::{AliasSource, AliasSourceError, AliasSourceResult};

#[cfg(test)]
pub use executor::MockAliasExecutor;
#[cfg(test)]
pub use source::MockAliasSource;
