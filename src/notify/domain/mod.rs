//! Notification domain types.

mod error;
mod format;
mod payload;

pub use error::NotificationError;
pub use format::format_message;
pub use payload::NotificationPayload;
