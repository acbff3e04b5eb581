//! Resolution of chat text to alias formats.

use std::sync::Arc;

use super::CommandRegistry;
use crate::alias::domain::ResolvedMatch;

/// Resolves chat text against the current registry snapshot.
#[derive(Debug, Clone)]
pub struct Resolver {
    registry: Arc<CommandRegistry>,
}

impl Resolver {
    /// Creates a resolver reading from `registry`.
    #[must_use]
    pub const fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    /// Returns the first format, in registration order, recognizing `text`.
    ///
    /// The text is lower-cased before matching and the lower-cased form is
    /// carried in the result. Text that matches nothing, including empty
    /// text, yields `None`.
    #[must_use]
    pub fn resolve(&self, text: &str) -> Option<ResolvedMatch> {
        if text.trim().is_empty() {
            return None;
        }
        let command = text.to_lowercase();
        let snapshot = self.registry.current();
        snapshot
            .first_match(&command)
            .map(|matcher| ResolvedMatch::new(matcher.owner(), matcher.format(), command.clone()))
    }
}
