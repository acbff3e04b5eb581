//! Alias source port.
//!
//! The source port supplies the current alias listing to the refresher.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::alias::domain::{AliasDefinition, AliasDomainError};

/// Result type for alias source operations.
pub type AliasSourceResult<T> = Result<T, AliasSourceError>;

/// Port for fetching alias definitions from the automation service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AliasSource: Send + Sync {
    /// Fetches the full alias listing in service order.
    ///
    /// # Errors
    ///
    /// Returns [`AliasSourceError`] on transport failures, unexpected status
    /// codes, or unparseable listings.
    async fn fetch_aliases(&self) -> AliasSourceResult<Vec<AliasDefinition>>;
}

/// Errors returned by alias source adapters.
#[derive(Debug, Clone, Error)]
pub enum AliasSourceError {
    /// The request could not be delivered or the response could not be read.
    #[error("alias listing transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The service answered with a non-success status.
    #[error("alias listing failed with status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// The listing body could not be decoded.
    #[error(transparent)]
    Decode(#[from] AliasDomainError),
}

impl AliasSourceError {
    /// Wraps a transport error from the source adapter.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
