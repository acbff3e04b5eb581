//! Notification services.

mod notifier;

pub use notifier::{AckStatus, InboundNotifier, WebhookAck};
