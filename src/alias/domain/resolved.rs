//! Result of resolving chat text against a registry snapshot.

use serde::{Deserialize, Serialize};

/// A chat line resolved to one alias format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMatch {
    alias_name: String,
    format: String,
    raw_text: String,
}

impl ResolvedMatch {
    /// Creates a resolved match.
    #[must_use]
    pub fn new(
        alias_name: impl Into<String>,
        format: impl Into<String>,
        raw_text: impl Into<String>,
    ) -> Self {
        Self {
            alias_name: alias_name.into(),
            format: format.into(),
            raw_text: raw_text.into(),
        }
    }

    /// Returns the owning alias name.
    #[must_use]
    pub fn alias_name(&self) -> &str {
        &self.alias_name
    }

    /// Returns the matched format string.
    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Returns the normalized command text that was matched.
    #[must_use]
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }
}
