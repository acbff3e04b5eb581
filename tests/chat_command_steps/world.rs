//! Shared world state for chat command BDD scenarios.

use std::sync::Arc;
use std::time::Duration;

use chatops_relay::{
    alias::{
        adapters::{InMemoryAliasExecutor, InMemoryAliasSource},
        domain::AliasDefinition,
        services::{
            CommandRegistry, Dispatcher, RefreshError, RefreshOutcome, RegistryRefresher,
            Resolver,
        },
    },
    chat::{adapters::RecordingChatSink, services::ChatCommandHandler},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Scenario world for chat command behaviour tests.
pub struct ChatCommandWorld {
    pub source: Arc<InMemoryAliasSource>,
    pub registry: Arc<CommandRegistry>,
    pub refresher: RegistryRefresher<InMemoryAliasSource, DefaultClock>,
    pub resolver: Resolver,
    pub executor: Arc<InMemoryAliasExecutor>,
    pub sink: Arc<RecordingChatSink>,
    pub handler: ChatCommandHandler<InMemoryAliasExecutor, RecordingChatSink>,
    pub advertised: Vec<AliasDefinition>,
    pub last_refresh: Option<Result<RefreshOutcome, RefreshError>>,
}

impl ChatCommandWorld {
    /// Creates a world with an empty registry.
    #[must_use]
    pub fn new() -> Self {
        let source = Arc::new(InMemoryAliasSource::new());
        let registry = Arc::new(CommandRegistry::new(&DefaultClock));
        let refresher = RegistryRefresher::new(
            Arc::clone(&source),
            Arc::clone(&registry),
            Arc::new(DefaultClock),
            Duration::from_secs(120),
        );
        let executor = Arc::new(InMemoryAliasExecutor::accepting("exec-1"));
        let sink = Arc::new(RecordingChatSink::new());
        let dispatcher = Arc::new(Dispatcher::new(Arc::clone(&executor), "hubot"));
        let handler = ChatCommandHandler::new(
            "hubot",
            Arc::clone(&registry),
            dispatcher,
            Arc::clone(&sink),
        );

        Self {
            resolver: Resolver::new(Arc::clone(&registry)),
            source,
            registry,
            refresher,
            executor,
            sink,
            handler,
            advertised: Vec::new(),
            last_refresh: None,
        }
    }
}

impl Default for ChatCommandWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[fixture]
pub fn world() -> ChatCommandWorld {
    ChatCommandWorld::new()
}

/// Runs an async step body on the scenario runtime.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
