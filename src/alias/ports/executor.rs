//! Remote executor port for alias executions.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::alias::domain::ExecutionRequest;

/// Result type for executor operations.
pub type ExecutorResult<T> = Result<T, ExecutorError>;

/// Status and body returned by the remote executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

impl ExecutionResponse {
    /// Creates an execution response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Port for submitting alias executions.
///
/// Adapters report every answer they receive, including error statuses;
/// only failures to obtain an answer are errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AliasExecutor: Send + Sync {
    /// Submits an execution request.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError`] when no response could be obtained.
    async fn execute(&self, request: &ExecutionRequest) -> ExecutorResult<ExecutionResponse>;
}

/// Errors returned by executor adapters.
#[derive(Debug, Clone, Error)]
pub enum ExecutorError {
    /// The request could not be delivered or the response could not be read.
    #[error("{0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl ExecutorError {
    /// Wraps a transport error from the executor adapter.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
