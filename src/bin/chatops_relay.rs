//! Runs the chatops relay.
//!
//! Usage:
//!
//! ```text
//! ST2_API=https://st2.example.com/api chatops-relay
//! ```
//!
//! Configuration is read from the environment (see
//! [`chatops_relay::config::RelayConfig`]). Chat input is read from stdin
//! and replies are written to stdout; result notifications are accepted on
//! `POST /hubot/st2`. The process exits with status 2 when authentication
//! fails.

use std::future::IntoFuture;
use std::process::ExitCode;
use std::sync::Arc;

use chatops_relay::{
    alias::services::{CommandRegistry, Dispatcher, RegistryRefresher},
    chat::{
        adapters::{ShellChatAdapter, StreamChatSink},
        services::ChatCommandHandler,
    },
    config::{ConfigError, RelayConfig},
    notify::{adapters::router, services::InboundNotifier},
    stackstorm::{AuthError, ClientSetupError, StackStormClient, StartupPlan},
};
use mockable::DefaultClock;
use thiserror::Error;
use tokio::io::BufReader;
use tokio::net::TcpListener;
use tokio::runtime::Builder;
use tracing_subscriber::EnvFilter;

const AUTH_FAILURE_EXIT: u8 = 2;

/// Errors that stop the relay.
#[derive(Debug, Error)]
enum RelayError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    ClientSetup(#[from] ClientSetupError),
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] std::io::Error),
    #[error("webhook server failed: {0}")]
    Webhook(#[source] std::io::Error),
    #[error("chat input failed: {0}")]
    ChatInput(#[source] std::io::Error),
}

impl RelayError {
    const fn exit_code(&self) -> u8 {
        match self {
            Self::Auth(_) => AUTH_FAILURE_EXIT,
            _ => 1,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "relay stopped");
            ExitCode::from(error.exit_code())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<(), RelayError> {
    let config = RelayConfig::from_env()?;
    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(RelayError::RuntimeInit)?;
    runtime.block_on(serve(config))
}

async fn serve(config: RelayConfig) -> Result<(), RelayError> {
    let anonymous = StackStormClient::from_config(&config)?;
    let token = StartupPlan::from_config(&config).token(&anonymous).await?;
    let client = Arc::new(anonymous.with_token(token));

    let registry = Arc::new(CommandRegistry::new(&DefaultClock));
    let refresher = Arc::new(RegistryRefresher::new(
        Arc::clone(&client),
        Arc::clone(&registry),
        Arc::new(DefaultClock),
        config.refresh_interval,
    ));
    let refresh_task = refresher.spawn();

    let sink = Arc::new(StreamChatSink::new(tokio::io::stdout()));
    let dispatcher = Arc::new(Dispatcher::new(
        Arc::clone(&client),
        config.notification_channel.as_str(),
    ));
    let handler = ChatCommandHandler::new(
        config.bot_name.as_str(),
        registry,
        dispatcher,
        Arc::clone(&sink),
    );

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .map_err(RelayError::Webhook)?;
    tracing::info!(address = %config.listen_addr, "result webhook listening");
    let webhook =
        axum::serve(listener, router(Arc::new(InboundNotifier::new(sink)))).into_future();

    let shell = ShellChatAdapter::from_env();
    let chat = shell.run(BufReader::new(tokio::io::stdin()), &handler);

    let outcome = tokio::select! {
        result = webhook => result.map_err(RelayError::Webhook),
        result = chat => {
            tracing::info!("chat input closed");
            result.map_err(RelayError::ChatInput)
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted");
            Ok(())
        }
    };
    refresh_task.abort();
    outcome
}
