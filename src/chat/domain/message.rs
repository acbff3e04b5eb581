//! Incoming and outgoing chat messages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A message delivered by the chat adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingMessage {
    /// Sender user name.
    pub user: String,
    /// Room the message was posted in.
    pub room: String,
    /// Raw message text.
    pub text: String,
}

impl IncomingMessage {
    /// Creates an incoming message.
    #[must_use]
    pub fn new(user: impl Into<String>, room: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            room: room.into(),
            text: text.into(),
        }
    }
}

/// Destination of an outgoing message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Recipient {
    /// A room or channel.
    Room(String),
    /// A single user, privately.
    User(String),
}

impl Recipient {
    /// Returns the room or user name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Room(name) | Self::User(name) => name,
        }
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// A message to be sent through the chat adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    /// Destination.
    pub recipient: Recipient,
    /// Message text.
    pub text: String,
}

impl OutgoingMessage {
    /// Creates a message for a room.
    #[must_use]
    pub fn to_room(room: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            recipient: Recipient::Room(room.into()),
            text: text.into(),
        }
    }

    /// Creates a private message for a user.
    #[must_use]
    pub fn to_user(user: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            recipient: Recipient::User(user.into()),
            text: text.into(),
        }
    }
}
