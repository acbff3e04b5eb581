//! Decoding of webhook notification bodies.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{NotificationError, format_message};
use crate::chat::domain::OutgoingMessage;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const PAYLOAD_FIELD: &str = "payload";

/// A result notification posted by the automation service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NotificationPayload {
    /// Message to post; any JSON value.
    #[serde(default)]
    pub message: Value,
    /// User the result belongs to.
    #[serde(default)]
    pub user: Option<String>,
    /// Channel to post to.
    #[serde(default)]
    pub channel: Option<String>,
    /// Private delivery flag; only the JSON boolean `true` enables it.
    #[serde(default)]
    pub whisper: Value,
}

impl NotificationPayload {
    /// Decodes a webhook body.
    ///
    /// Form bodies may carry the notification as JSON in a `payload` field
    /// or as plain fields. JSON bodies may likewise wrap it in a `payload`
    /// string or be the notification object itself.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::MalformedBody`] when the body cannot be
    /// read as a notification and
    /// [`NotificationError::MalformedPayloadField`] when the `payload` field
    /// is not valid JSON.
    pub fn decode(content_type: Option<&str>, body: &[u8]) -> Result<Self, NotificationError> {
        let envelope = if is_form(content_type) {
            form_fields(body)
        } else {
            serde_json::from_slice::<Value>(body)
                .map_err(|err| NotificationError::MalformedBody(err.to_string()))?
        };

        let unwrapped = match envelope.get(PAYLOAD_FIELD) {
            Some(Value::String(raw)) if !raw.is_empty() => Some(
                serde_json::from_str::<Value>(raw)
                    .map_err(|err| NotificationError::MalformedPayloadField(err.to_string()))?,
            ),
            None | Some(Value::Null | Value::String(_)) => None,
            Some(_) => {
                return Err(NotificationError::MalformedPayloadField(
                    "expected a JSON document in a string".to_owned(),
                ));
            }
        };
        let notification = unwrapped.unwrap_or(envelope);

        if !notification.is_object() {
            return Err(NotificationError::MalformedBody(
                "notification is not a JSON object".to_owned(),
            ));
        }
        serde_json::from_value(notification)
            .map_err(|err| NotificationError::MalformedBody(err.to_string()))
    }

    /// Returns the user, if one was given.
    #[must_use]
    pub fn sender(&self) -> Option<&str> {
        self.user.as_deref().filter(|user| !user.is_empty())
    }

    /// Returns `true` when the message should go privately to the user.
    #[must_use]
    pub fn is_whisper(&self) -> bool {
        self.whisper == Value::Bool(true)
    }

    /// Builds the chat message for this notification.
    ///
    /// A whispered notification goes to the user. Otherwise it goes to the
    /// channel, prefixed with `<user> :` on its own line when a user is
    /// named.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::MissingRecipient`] when the message must
    /// go to a channel and none was given.
    pub fn into_outgoing(self) -> Result<OutgoingMessage, NotificationError> {
        let text = format_message(&self.message);
        match self.sender() {
            Some(user) if self.is_whisper() => Ok(OutgoingMessage::to_user(user, text)),
            Some(user) => {
                let prefixed = format!("{user} :\n{text}");
                Ok(OutgoingMessage::to_room(self.channel()?, prefixed))
            }
            None => Ok(OutgoingMessage::to_room(self.channel()?, text)),
        }
    }

    fn channel(&self) -> Result<&str, NotificationError> {
        self.channel
            .as_deref()
            .filter(|channel| !channel.is_empty())
            .ok_or(NotificationError::MissingRecipient)
    }
}

fn is_form(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

fn form_fields(body: &[u8]) -> Value {
    let fields: Map<String, Value> = url::form_urlencoded::parse(body)
        .map(|(key, value)| (key.into_owned(), Value::String(value.into_owned())))
        .collect();
    Value::Object(fields)
}
