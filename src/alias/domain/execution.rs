//! Execution request payloads and dispatch identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::ResolvedMatch;

/// Correlation identifier attached to one dispatch for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DispatchId(Uuid);

impl DispatchId {
    /// Creates a new random dispatch identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for DispatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DispatchId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Chat context of the message that triggered a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchContext {
    /// Name of the user who typed the command.
    pub sender: String,
    /// Room the command was typed in.
    pub source_channel: String,
}

impl DispatchContext {
    /// Creates a dispatch context.
    #[must_use]
    pub fn new(sender: impl Into<String>, source_channel: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            source_channel: source_channel.into(),
        }
    }
}

/// Payload submitted to the remote executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    /// Alias name.
    pub name: String,
    /// Matched format string.
    pub format: String,
    /// Command text as typed (lower-cased).
    pub command: String,
    /// Requesting user.
    pub user: String,
    /// Room the command came from.
    pub source_channel: String,
    /// Channel the executor should post results to.
    pub notification_channel: String,
}

impl ExecutionRequest {
    /// Builds a request from a resolved match and its chat context.
    #[must_use]
    pub fn from_match(
        resolved: &ResolvedMatch,
        context: &DispatchContext,
        notification_channel: impl Into<String>,
    ) -> Self {
        Self {
            name: resolved.alias_name().to_owned(),
            format: resolved.format().to_owned(),
            command: resolved.raw_text().to_owned(),
            user: context.sender.clone(),
            source_channel: context.source_channel.clone(),
            notification_channel: notification_channel.into(),
        }
    }
}
