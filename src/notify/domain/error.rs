//! Errors raised while turning a webhook notification into a chat message.

use thiserror::Error;

use crate::chat::ports::ChatSinkError;

/// Faults of the result-notification webhook.
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    /// The request body is not a usable notification.
    #[error("malformed notification body: {0}")]
    MalformedBody(String),

    /// The `payload` field could not be decoded as JSON.
    #[error("malformed payload field: {0}")]
    MalformedPayloadField(String),

    /// No channel was given where the message must go to one.
    #[error("notification names no channel to post to")]
    MissingRecipient,

    /// The chat platform did not accept the message.
    #[error(transparent)]
    Delivery(#[from] ChatSinkError),
}
