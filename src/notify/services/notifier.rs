//! Result notification handling.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::chat::{domain::OutgoingMessage, ports::ChatSink};
use crate::notify::domain::{NotificationError, NotificationPayload};

/// Outcome reported back to the webhook caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AckStatus {
    /// The message was posted.
    Completed,
    /// The notification could not be posted.
    Failed,
}

/// Body of every webhook response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookAck {
    /// Overall status.
    pub status: AckStatus,
    /// Human-readable detail.
    pub msg: String,
}

impl WebhookAck {
    /// Acknowledges a posted message.
    #[must_use]
    pub fn completed() -> Self {
        Self {
            status: AckStatus::Completed,
            msg: "Message posted successfully".to_owned(),
        }
    }

    /// Reports a failed notification.
    #[must_use]
    pub fn failed(error: &NotificationError) -> Self {
        Self {
            status: AckStatus::Failed,
            msg: format!("An error occurred trying to post the message: {error}"),
        }
    }
}

/// Turns result notifications into chat messages and posts them.
pub struct InboundNotifier<S>
where
    S: ChatSink,
{
    sink: Arc<S>,
}

impl<S> InboundNotifier<S>
where
    S: ChatSink,
{
    /// Creates a notifier posting through `sink`.
    #[must_use]
    pub const fn new(sink: Arc<S>) -> Self {
        Self { sink }
    }

    /// Builds the chat message for a webhook body without sending it.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError`] when the body cannot be decoded or
    /// names no usable recipient.
    pub fn handle(
        &self,
        content_type: Option<&str>,
        body: &[u8],
    ) -> Result<OutgoingMessage, NotificationError> {
        let payload = NotificationPayload::decode(content_type, body)?;
        tracing::debug!(?payload, "decoded result notification");
        payload.into_outgoing()
    }

    /// Handles a webhook body and posts the resulting message.
    ///
    /// Never fails: faults are logged and reported in the returned
    /// acknowledgement.
    pub async fn deliver(&self, content_type: Option<&str>, body: &[u8]) -> WebhookAck {
        match self.post(content_type, body).await {
            Ok(()) => WebhookAck::completed(),
            Err(error) => {
                tracing::error!(%error, "unable to post result notification");
                WebhookAck::failed(&error)
            }
        }
    }

    async fn post(&self, content_type: Option<&str>, body: &[u8]) -> Result<(), NotificationError> {
        let message = self.handle(content_type, body)?;
        tracing::info!(recipient = %message.recipient, "posting result notification");
        self.sink.send(&message).await?;
        Ok(())
    }
}
