//! Domain model for alias definitions, compiled matchers and registry
//! snapshots.
//!
//! Everything here is pure: compilation, snapshot construction and matching
//! perform no I/O. Fetching and dispatching live behind the ports.

mod definition;
mod error;
mod execution;
mod matcher;
mod resolved;
mod snapshot;

pub use definition::{AliasDefinition, decode_alias_list};
pub use error::AliasDomainError;
pub use execution::{DispatchContext, DispatchId, ExecutionRequest};
pub use matcher::{CompiledMatcher, ExtractedParameters};
pub use resolved::ResolvedMatch;
pub use snapshot::RegistrySnapshot;
