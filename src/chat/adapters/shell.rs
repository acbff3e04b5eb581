//! Line-oriented chat adapter for local use.
//!
//! Each input line becomes a message from the configured user in the
//! `shell` room; outgoing messages are written as `[room] text` lines, or
//! `[@user] text` when sent privately.

use async_trait::async_trait;
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

use crate::alias::ports::AliasExecutor;
use crate::chat::{
    domain::{IncomingMessage, OutgoingMessage, Recipient},
    ports::{ChatSink, ChatSinkError, ChatSinkResult},
    services::{ChatCommandHandler, MessageDisposition},
};

/// Room name used for shell input.
pub const SHELL_ROOM: &str = "shell";

/// Chat sink writing one line per message to an async writer.
#[derive(Debug)]
pub struct StreamChatSink<W> {
    writer: Mutex<W>,
}

impl<W> StreamChatSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    /// Wraps `writer`.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Returns the inner writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

/// Renders a message the way [`StreamChatSink`] writes it.
#[must_use]
pub fn render_line(message: &OutgoingMessage) -> String {
    match &message.recipient {
        Recipient::Room(room) => format!("[{room}] {}\n", message.text),
        Recipient::User(user) => format!("[@{user}] {}\n", message.text),
    }
}

#[async_trait]
impl<W> ChatSink for StreamChatSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn send(&self, message: &OutgoingMessage) -> ChatSinkResult<()> {
        let line = render_line(message);
        let mut writer = self.writer.lock().await;
        writer
            .write_all(line.as_bytes())
            .await
            .map_err(ChatSinkError::delivery)?;
        writer.flush().await.map_err(ChatSinkError::delivery)
    }
}

/// Feeds lines from a reader into a [`ChatCommandHandler`].
#[derive(Debug, Clone)]
pub struct ShellChatAdapter {
    user: String,
    room: String,
}

impl ShellChatAdapter {
    /// Creates an adapter posting as `user` into the shell room.
    #[must_use]
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            room: SHELL_ROOM.to_owned(),
        }
    }

    /// Creates an adapter posting as the `USER` environment variable.
    #[must_use]
    pub fn from_env() -> Self {
        let user = std::env::var("USER")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "shell".to_owned());
        Self::new(user)
    }

    /// Returns the user name messages are posted as.
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Reads lines until end of input, handling each as a chat message.
    ///
    /// Dispatches started from a line are awaited before the next line is
    /// read so replies stay in input order.
    ///
    /// # Errors
    ///
    /// Returns any error raised while reading input.
    pub async fn run<R, E, S>(&self, reader: R, handler: &ChatCommandHandler<E, S>) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        E: AliasExecutor + 'static,
        S: ChatSink + 'static,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let message = IncomingMessage::new(self.user.as_str(), self.room.as_str(), line);
            if let MessageDisposition::Dispatched(task) = handler.handle(&message).await {
                if let Err(error) = task.await {
                    tracing::error!(%error, "dispatch task failed");
                }
            }
        }
        Ok(())
    }
}
