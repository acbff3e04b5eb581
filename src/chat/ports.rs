//! Chat delivery port.
//!
//! The engine only needs to send text to a room or user; every
//! platform-specific concern stays inside the adapter.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use super::domain::OutgoingMessage;

/// Result type for chat delivery.
pub type ChatSinkResult<T> = Result<T, ChatSinkError>;

/// Port for sending messages through the chat platform.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatSink: Send + Sync {
    /// Sends one message.
    ///
    /// # Errors
    ///
    /// Returns [`ChatSinkError`] when the platform rejects or cannot receive
    /// the message.
    async fn send(&self, message: &OutgoingMessage) -> ChatSinkResult<()>;
}

/// Errors returned by chat adapters.
#[derive(Debug, Clone, Error)]
pub enum ChatSinkError {
    /// The message could not be delivered.
    #[error("chat delivery failed: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl ChatSinkError {
    /// Wraps a delivery error from the chat adapter.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
