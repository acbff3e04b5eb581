//! Routing of chat messages to help, resolution and dispatch.

use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::alias::{
    domain::DispatchContext,
    ports::AliasExecutor,
    services::{CommandRegistry, Dispatcher, Resolver},
};
use crate::chat::{
    domain::{IncomingMessage, OutgoingMessage, addressed_text},
    ports::ChatSink,
};

const HELP_COMMAND: &str = "help";
const EMPTY_HELP: &str = "No commands are registered yet.";

/// What the handler did with a message.
#[derive(Debug)]
pub enum MessageDisposition {
    /// The message was not a command for this bot.
    Ignored,
    /// The command listing was sent.
    HelpSent,
    /// The command was dispatched; the task reports the outcome in chat.
    Dispatched(JoinHandle<()>),
}

/// Offers messages addressed to the bot to the resolver and dispatches
/// matches without waiting for the executor.
pub struct ChatCommandHandler<E, S>
where
    E: AliasExecutor,
    S: ChatSink,
{
    bot_name: String,
    registry: Arc<CommandRegistry>,
    resolver: Resolver,
    dispatcher: Arc<Dispatcher<E>>,
    sink: Arc<S>,
}

impl<E, S> ChatCommandHandler<E, S>
where
    E: AliasExecutor + 'static,
    S: ChatSink + 'static,
{
    /// Creates a handler answering to `bot_name`.
    #[must_use]
    pub fn new(
        bot_name: impl Into<String>,
        registry: Arc<CommandRegistry>,
        dispatcher: Arc<Dispatcher<E>>,
        sink: Arc<S>,
    ) -> Self {
        Self {
            bot_name: bot_name.into(),
            resolver: Resolver::new(Arc::clone(&registry)),
            registry,
            dispatcher,
            sink,
        }
    }

    /// Returns the name the bot answers to.
    #[must_use]
    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    /// Handles one incoming chat message.
    ///
    /// Messages not addressed to the bot and commands matching no alias are
    /// ignored. A matched command is dispatched on a spawned task that
    /// replies to the originating room once the executor answers.
    pub async fn handle(&self, message: &IncomingMessage) -> MessageDisposition {
        let Some(command) = addressed_text(&self.bot_name, &message.text) else {
            return MessageDisposition::Ignored;
        };

        if command.eq_ignore_ascii_case(HELP_COMMAND) {
            self.send_help(&message.room).await;
            return MessageDisposition::HelpSent;
        }

        let Some(resolved) = self.resolver.resolve(command) else {
            tracing::debug!(room = %message.room, "no alias matches message");
            return MessageDisposition::Ignored;
        };

        let dispatcher = Arc::clone(&self.dispatcher);
        let sink = Arc::clone(&self.sink);
        let context = DispatchContext::new(message.user.as_str(), message.room.as_str());
        let handle = tokio::spawn(async move {
            let outcome = dispatcher.dispatch(&resolved, &context).await;
            let reply = OutgoingMessage::to_room(context.source_channel.as_str(), outcome.message());
            if let Err(error) = sink.send(&reply).await {
                tracing::error!(%error, "failed to report dispatch outcome");
            }
        });
        MessageDisposition::Dispatched(handle)
    }

    async fn send_help(&self, room: &str) {
        let entries = self.registry.current().help_entries(&self.bot_name);
        let text = if entries.is_empty() {
            EMPTY_HELP.to_owned()
        } else {
            entries.join("\n")
        };
        if let Err(error) = self.sink.send(&OutgoingMessage::to_room(room, text)).await {
            tracing::error!(%error, "failed to send command help");
        }
    }
}
