//! Format-string compilation into recognizers.
//!
//! Every `{{placeholder}}` token becomes a non-greedy `.+?` capture and an
//! optional trailer accepting whitespace-separated `key=value` pairs is
//! appended. The pattern is anchored to the end of the input only, so a chat
//! mention may precede the command. Literal text between placeholders is
//! passed through to the regex engine unescaped: a format whose literal text
//! carries regex syntax matches according to that syntax, or fails to
//! compile and is dropped.

use regex::{Regex, RegexBuilder};
use std::collections::BTreeMap;

use super::AliasDomainError;

const PLACEHOLDER_OPEN: &str = "{{";
const PLACEHOLDER_CLOSE: &str = "}}";
const TRAILER_GROUP: &str = "trailer";
const TRAILER_PATTERN: &str = r"(?P<trailer>(?:\s+)?(?:\s?[0-9A-Za-z_]+=[0-9A-Za-z_]+)*)$";

/// A piece of a format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

/// Compiled recognizer for one format string of an alias.
#[derive(Debug, Clone)]
pub struct CompiledMatcher {
    format: String,
    owner: String,
    placeholders: Vec<String>,
    recognizer: Regex,
}

impl CompiledMatcher {
    /// Compiles `format`, owned by alias `owner`, into a matcher.
    ///
    /// # Errors
    ///
    /// Returns [`AliasDomainError::EmptyFormat`] for an empty format and
    /// [`AliasDomainError::InvalidPattern`] when the generated pattern is
    /// rejected by the regex engine.
    pub fn compile(
        owner: impl Into<String>,
        format: impl Into<String>,
    ) -> Result<Self, AliasDomainError> {
        let owner = owner.into();
        let format = format.into();
        if format.is_empty() {
            return Err(AliasDomainError::EmptyFormat { alias: owner });
        }

        let segments = split_format(&format);
        let mut pattern = String::with_capacity(format.len() + TRAILER_PATTERN.len());
        let mut placeholders = Vec::new();
        for segment in &segments {
            match segment {
                Segment::Literal(text) => pattern.push_str(text),
                Segment::Placeholder(token) => {
                    pattern.push_str(&format!("(?P<p{}>.+?)", placeholders.len()));
                    placeholders.push(placeholder_name(token));
                }
            }
        }
        pattern.push_str(TRAILER_PATTERN);

        let recognizer = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|error| AliasDomainError::InvalidPattern {
                alias: owner.clone(),
                format: format.clone(),
                reason: error.to_string(),
            })?;

        Ok(Self {
            format,
            owner,
            placeholders,
            recognizer,
        })
    }

    /// Returns the source format string.
    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Returns the owning alias name.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns placeholder names in textual order.
    #[must_use]
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// Returns the generated regular expression source.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.recognizer.as_str()
    }

    /// Tests whether `text` is recognized by this matcher.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.recognizer.is_match(text)
    }

    /// Extracts placeholder values and trailing `key=value` pairs from `text`.
    ///
    /// Returns `None` when the text is not recognized.
    #[must_use]
    pub fn extract(&self, text: &str) -> Option<ExtractedParameters> {
        let captures = self.recognizer.captures(text)?;

        let bindings = self
            .placeholders
            .iter()
            .enumerate()
            .filter_map(|(index, name)| {
                captures
                    .name(&format!("p{index}"))
                    .map(|value| (name.clone(), value.as_str().to_owned()))
            })
            .collect();

        let extra = captures
            .name(TRAILER_GROUP)
            .map(|trailer| parse_trailer(trailer.as_str()))
            .unwrap_or_default();

        Some(ExtractedParameters { bindings, extra })
    }
}

/// Parameter values recovered from recognized text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedParameters {
    /// Placeholder bindings in textual order.
    pub bindings: Vec<(String, String)>,
    /// Trailing `key=value` pairs.
    pub extra: BTreeMap<String, String>,
}

impl ExtractedParameters {
    /// Returns the value bound to a placeholder.
    #[must_use]
    pub fn binding(&self, name: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(placeholder, _)| placeholder == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Splits a format into literal and placeholder segments.
///
/// A placeholder is `{{`, at least one character, then the nearest `}}`.
fn split_format(format: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = format;

    while let Some(open) = rest.find(PLACEHOLDER_OPEN) {
        let (before, from_open) = rest.split_at(open);
        let Some(first_inner) = from_open
            .get(PLACEHOLDER_OPEN.len()..)
            .and_then(|inner| inner.chars().next())
        else {
            break;
        };
        let search_from = PLACEHOLDER_OPEN.len() + first_inner.len_utf8();
        let Some(close) = from_open
            .get(search_from..)
            .and_then(|tail| tail.find(PLACEHOLDER_CLOSE))
        else {
            break;
        };

        let token_end = search_from + close + PLACEHOLDER_CLOSE.len();
        let (token, after) = from_open.split_at(token_end);
        if !before.is_empty() {
            segments.push(Segment::Literal(before));
        }
        segments.push(Segment::Placeholder(token));
        rest = after;
    }

    if !rest.is_empty() {
        segments.push(Segment::Literal(rest));
    }
    segments
}

/// Derives the placeholder name from a `{{name}}` or `{{name=default}}` token.
fn placeholder_name(token: &str) -> String {
    let inner = token
        .strip_prefix(PLACEHOLDER_OPEN)
        .and_then(|text| text.strip_suffix(PLACEHOLDER_CLOSE))
        .unwrap_or(token);
    let name = inner.split_once('=').map_or(inner, |(name, _)| name);
    name.trim().to_owned()
}

fn parse_trailer(trailer: &str) -> BTreeMap<String, String> {
    trailer
        .split_whitespace()
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .collect()
}
