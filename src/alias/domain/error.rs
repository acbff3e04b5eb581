//! Error types for alias definition validation and pattern compilation.

use thiserror::Error;

/// Errors returned while validating alias definitions or compiling formats.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AliasDomainError {
    /// The alias name is empty after trimming.
    #[error("alias name must not be empty")]
    EmptyAliasName,

    /// The alias advertises no formats.
    #[error("no formats specified for alias '{0}'")]
    NoFormats(String),

    /// A format string is empty.
    #[error("skipped empty format for alias '{alias}'")]
    EmptyFormat {
        /// Owning alias name.
        alias: String,
    },

    /// The generated recognizer for a format string failed to compile.
    #[error("format '{format}' of alias '{alias}' does not compile: {reason}")]
    InvalidPattern {
        /// Owning alias name.
        alias: String,
        /// Source format string.
        format: String,
        /// Compiler diagnostic.
        reason: String,
    },

    /// The alias listing body is not valid JSON.
    #[error("alias listing is not valid JSON: {0}")]
    MalformedAliasList(String),

    /// The alias listing body is valid JSON but not an array.
    #[error("alias listing must be a JSON array, got: {0}")]
    UnexpectedAliasList(String),
}
