//! Immutable registry snapshots.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use mockable::Clock;

use super::{AliasDefinition, CompiledMatcher};

/// One complete, immutable version of the command registry.
///
/// Matchers are kept in registration order: the order in which the
/// automation service listed aliases and, within an alias, formats. When two
/// aliases share a format string the later one replaces the earlier matcher
/// but keeps its position.
#[derive(Debug, Clone)]
pub struct RegistrySnapshot {
    matchers: IndexMap<String, CompiledMatcher>,
    aliases: IndexMap<String, AliasDefinition>,
    built_at: DateTime<Utc>,
}

impl RegistrySnapshot {
    /// Creates a snapshot with no commands.
    #[must_use]
    pub fn empty(clock: &impl Clock) -> Self {
        Self {
            matchers: IndexMap::new(),
            aliases: IndexMap::new(),
            built_at: clock.utc(),
        }
    }

    /// Builds a snapshot from alias definitions in listing order.
    ///
    /// Formats that fail to compile are logged and dropped; aliases left with
    /// no valid formats are logged and skipped.
    #[must_use]
    pub fn build(aliases: impl IntoIterator<Item = AliasDefinition>, clock: &impl Clock) -> Self {
        let mut snapshot = Self::empty(clock);

        for alias in aliases {
            if let Err(error) = alias.validate() {
                tracing::error!(%error, "skipping alias");
                continue;
            }

            let mut accepted = 0_usize;
            for format in &alias.formats {
                match CompiledMatcher::compile(alias.name.as_str(), format.as_str()) {
                    Ok(matcher) => {
                        tracing::debug!(alias = %alias.name, format = %format, "added command");
                        snapshot.matchers.insert(format.clone(), matcher);
                        accepted += 1;
                    }
                    Err(error) => tracing::warn!(%error, "dropping alias format"),
                }
            }

            if accepted == 0 {
                tracing::error!(alias = %alias.name, "alias has no usable formats");
                continue;
            }
            snapshot.aliases.insert(alias.name.clone(), alias);
        }

        snapshot
    }

    /// Iterates matchers in registration order.
    pub fn matchers(&self) -> impl Iterator<Item = &CompiledMatcher> {
        self.matchers.values()
    }

    /// Returns the matcher compiled from `format`.
    #[must_use]
    pub fn matcher(&self, format: &str) -> Option<&CompiledMatcher> {
        self.matchers.get(format)
    }

    /// Returns the alias definition registered under `name`.
    #[must_use]
    pub fn alias(&self, name: &str) -> Option<&AliasDefinition> {
        self.aliases.get(name)
    }

    /// Returns the first matcher, in registration order, recognizing `text`.
    #[must_use]
    pub fn first_match(&self, text: &str) -> Option<&CompiledMatcher> {
        self.matchers().find(|matcher| matcher.is_match(text))
    }

    /// Returns the number of registered format strings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Returns `true` when no format strings are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Returns the number of registered aliases.
    #[must_use]
    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    /// Returns when the snapshot was built.
    #[must_use]
    pub const fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// Returns one help line per registered format, in registration order.
    ///
    /// Lines read `<bot> <format> - <description>`; the description part is
    /// omitted when the owning alias has none.
    #[must_use]
    pub fn help_entries(&self, bot_name: &str) -> Vec<String> {
        self.matchers()
            .map(|matcher| {
                let description = self
                    .alias(matcher.owner())
                    .and_then(|alias| alias.description.as_deref())
                    .filter(|text| !text.trim().is_empty());
                match description {
                    Some(text) => format!("{bot_name} {} - {text}", matcher.format()),
                    None => format!("{bot_name} {}", matcher.format()),
                }
            })
            .collect()
    }
}
