//! Notification adapters.

pub mod webhook;

pub use webhook::{WEBHOOK_PATH, router};
