//! HTTP endpoint receiving result notifications.

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, header},
    routing::post,
};
use std::sync::Arc;

use crate::chat::ports::ChatSink;
use crate::notify::services::{InboundNotifier, WebhookAck};

/// Route the automation service posts results to.
pub const WEBHOOK_PATH: &str = "/hubot/st2";

/// Builds the webhook router.
///
/// Every request is answered with HTTP 200 and a [`WebhookAck`] body, also
/// when the notification could not be posted.
pub fn router<S>(notifier: Arc<InboundNotifier<S>>) -> Router
where
    S: ChatSink + 'static,
{
    Router::new()
        .route(WEBHOOK_PATH, post(receive::<S>))
        .with_state(notifier)
}

async fn receive<S>(
    State(notifier): State<Arc<InboundNotifier<S>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<WebhookAck>
where
    S: ChatSink + 'static,
{
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    Json(notifier.deliver(content_type, &body).await)
}
