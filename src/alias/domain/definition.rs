//! Alias definitions as advertised by the automation service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::AliasDomainError;

/// Maximum number of body characters echoed back in listing errors.
const BODY_EXCERPT_LIMIT: usize = 200;

/// One named command concept with the formats users may type to invoke it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasDefinition {
    /// Unique alias name.
    pub name: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered format strings containing literal text and `{{placeholder}}` tokens.
    #[serde(default)]
    pub formats: Vec<String>,
}

impl AliasDefinition {
    /// Creates an alias definition without description or formats.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            formats: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a format string.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.formats.push(format.into());
        self
    }

    /// Checks the invariants an alias must satisfy before entering a registry.
    ///
    /// # Errors
    ///
    /// Returns [`AliasDomainError::EmptyAliasName`] for a blank name and
    /// [`AliasDomainError::NoFormats`] when no formats are advertised.
    pub fn validate(&self) -> Result<(), AliasDomainError> {
        if self.name.trim().is_empty() {
            return Err(AliasDomainError::EmptyAliasName);
        }
        if self.formats.is_empty() {
            return Err(AliasDomainError::NoFormats(self.name.clone()));
        }
        Ok(())
    }
}

/// Decodes the JSON body of an alias listing.
///
/// Entries that are `null` or do not have the alias shape are logged and
/// skipped so one bad entry cannot hide the rest of the listing.
///
/// # Errors
///
/// Returns [`AliasDomainError::MalformedAliasList`] when the body is not
/// JSON and [`AliasDomainError::UnexpectedAliasList`] when it is not an array.
pub fn decode_alias_list(body: &str) -> Result<Vec<AliasDefinition>, AliasDomainError> {
    let parsed: Value = serde_json::from_str(body)
        .map_err(|error| AliasDomainError::MalformedAliasList(error.to_string()))?;

    let Value::Array(entries) = parsed else {
        return Err(AliasDomainError::UnexpectedAliasList(excerpt(body)));
    };

    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| decode_entry(index, entry))
        .collect())
}

/// Reads one listing entry field by field so a bad format or description
/// only costs that field, not the whole alias.
fn decode_entry(index: usize, entry: Value) -> Option<AliasDefinition> {
    let Value::Object(mut fields) = entry else {
        if entry.is_null() {
            tracing::error!(index, "no action alias specified for listing entry");
        } else {
            tracing::error!(index, "skipping alias listing entry that is not an object");
        }
        return None;
    };

    let Some(Value::String(name)) = fields.remove("name") else {
        tracing::error!(index, "skipping alias listing entry without a string name");
        return None;
    };

    let description = match fields.remove("description") {
        Some(Value::String(text)) => Some(text),
        None | Some(Value::Null) => None,
        Some(_) => {
            tracing::warn!(alias = %name, "ignoring non-string alias description");
            None
        }
    };

    let formats = match fields.remove("formats") {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(format) => Some(format),
                _ => {
                    tracing::warn!(alias = %name, "skipped empty command");
                    None
                }
            })
            .collect(),
        None | Some(Value::Null) => Vec::new(),
        Some(_) => {
            tracing::warn!(alias = %name, "ignoring non-array alias formats");
            Vec::new()
        }
    };

    Some(AliasDefinition {
        name,
        description,
        formats,
    })
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= BODY_EXCERPT_LIMIT {
        return trimmed.to_owned();
    }
    let mut shortened: String = trimmed.chars().take(BODY_EXCERPT_LIMIT).collect();
    shortened.push_str("...");
    shortened
}
