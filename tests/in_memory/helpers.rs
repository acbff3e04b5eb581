//! Shared fixtures for in-memory relay integration tests.

use std::sync::Arc;
use std::time::Duration;

use chatops_relay::{
    alias::{
        adapters::{InMemoryAliasExecutor, InMemoryAliasSource},
        domain::AliasDefinition,
        services::{CommandRegistry, Dispatcher, RegistryRefresher, Resolver},
    },
    chat::{adapters::RecordingChatSink, services::ChatCommandHandler},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Handler type wired to in-memory adapters.
pub type TestHandler = ChatCommandHandler<InMemoryAliasExecutor, RecordingChatSink>;

/// Refresher type wired to the in-memory source.
pub type TestRefresher = RegistryRefresher<InMemoryAliasSource, DefaultClock>;

/// A relay assembled from in-memory adapters.
pub struct Relay {
    pub source: Arc<InMemoryAliasSource>,
    pub registry: Arc<CommandRegistry>,
    pub refresher: Arc<TestRefresher>,
    pub resolver: Resolver,
    pub executor: Arc<InMemoryAliasExecutor>,
    pub sink: Arc<RecordingChatSink>,
    pub handler: TestHandler,
}

/// Alias listing in the shape the automation service advertises.
#[must_use]
pub fn service_listing() -> Vec<AliasDefinition> {
    vec![
        AliasDefinition::new("pack_deploy")
            .with_description("Deploy a pack")
            .with_format("deploy {{pack}} to {{environment=staging}}")
            .with_format("deploy {{pack}}"),
        AliasDefinition::new("service_restart")
            .with_description("Restart a service on a host")
            .with_format("restart {{service}} on {{host}}"),
        AliasDefinition::new("status").with_format("status"),
    ]
}

/// Provides a relay with the service listing already installed.
#[fixture]
pub fn relay() -> Relay {
    let source = Arc::new(InMemoryAliasSource::with_aliases(service_listing()));
    let registry = Arc::new(CommandRegistry::new(&DefaultClock));
    let refresher = Arc::new(RegistryRefresher::new(
        Arc::clone(&source),
        Arc::clone(&registry),
        Arc::new(DefaultClock),
        Duration::from_secs(60),
    ));
    registry.replace(service_listing(), &DefaultClock);
    let executor = Arc::new(InMemoryAliasExecutor::accepting(r#"{"id": "5f1e"}"#));
    let sink = Arc::new(RecordingChatSink::new());
    let dispatcher = Arc::new(Dispatcher::new(Arc::clone(&executor), "chatops"));
    let handler = ChatCommandHandler::new(
        "stanley",
        Arc::clone(&registry),
        dispatcher,
        Arc::clone(&sink),
    );
    Relay {
        source,
        resolver: Resolver::new(Arc::clone(&registry)),
        registry,
        refresher,
        executor,
        sink,
        handler,
    }
}
