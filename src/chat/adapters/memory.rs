//! In-memory chat sink recording sent messages.

use async_trait::async_trait;
use std::sync::{Arc, PoisonError, RwLock};

use crate::chat::{
    domain::OutgoingMessage,
    ports::{ChatSink, ChatSinkResult},
};

/// Chat sink that keeps every sent message for inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingChatSink {
    sent: Arc<RwLock<Vec<OutgoingMessage>>>,
}

impl RecordingChatSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the messages sent so far, in order.
    #[must_use]
    pub fn sent(&self) -> Vec<OutgoingMessage> {
        self.sent
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ChatSink for RecordingChatSink {
    async fn send(&self, message: &OutgoingMessage) -> ChatSinkResult<()> {
        self.sent
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.clone());
        Ok(())
    }
}
