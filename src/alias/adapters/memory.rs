//! In-memory alias source and executor adapters.
//!
//! These adapters stand in for the automation service in unit and
//! integration tests and for local experimentation.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use crate::alias::{
    domain::{AliasDefinition, ExecutionRequest},
    ports::{
        AliasExecutor, AliasSource, AliasSourceError, AliasSourceResult, ExecutionResponse,
        ExecutorError, ExecutorResult,
    },
};

/// In-memory alias source with a settable listing and failure switch.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAliasSource {
    state: Arc<RwLock<SourceState>>,
}

#[derive(Debug, Default)]
struct SourceState {
    aliases: Vec<AliasDefinition>,
    failure: Option<String>,
    fetch_count: usize,
}

impl InMemoryAliasSource {
    /// Creates a source with an empty listing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source serving `aliases`.
    #[must_use]
    pub fn with_aliases(aliases: impl IntoIterator<Item = AliasDefinition>) -> Self {
        let source = Self::new();
        source.set_aliases(aliases);
        source
    }

    /// Replaces the served listing and clears any configured failure.
    pub fn set_aliases(&self, aliases: impl IntoIterator<Item = AliasDefinition>) {
        let mut state = self.write_state();
        state.aliases = aliases.into_iter().collect();
        state.failure = None;
    }

    /// Makes subsequent fetches fail with a transport error.
    pub fn fail_with(&self, message: impl Into<String>) {
        self.write_state().failure = Some(message.into());
    }

    /// Returns how many fetches have been attempted.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        match self.state.read() {
            Ok(state) => state.fetch_count,
            Err(poisoned) => poisoned.into_inner().fetch_count,
        }
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, SourceState> {
        self.state
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl AliasSource for InMemoryAliasSource {
    async fn fetch_aliases(&self) -> AliasSourceResult<Vec<AliasDefinition>> {
        let mut state = self.write_state();
        state.fetch_count += 1;
        if let Some(message) = &state.failure {
            return Err(AliasSourceError::transport(std::io::Error::other(
                message.clone(),
            )));
        }
        Ok(state.aliases.clone())
    }
}

/// Scripted answer returned by [`InMemoryAliasExecutor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedExecution {
    /// Answer with the given response.
    Respond(ExecutionResponse),
    /// Fail with a transport error carrying the message.
    Fail(String),
}

/// In-memory executor that records requests and replays scripted answers.
///
/// Scripted answers are consumed in order; once exhausted the executor
/// falls back to its default answer.
#[derive(Debug, Clone)]
pub struct InMemoryAliasExecutor {
    state: Arc<RwLock<ExecutorState>>,
}

#[derive(Debug)]
struct ExecutorState {
    scripted: VecDeque<ScriptedExecution>,
    fallback: ScriptedExecution,
    requests: Vec<ExecutionRequest>,
}

impl InMemoryAliasExecutor {
    /// Creates an executor answering `200` with `body` by default.
    #[must_use]
    pub fn accepting(body: impl Into<String>) -> Self {
        Self::with_fallback(ScriptedExecution::Respond(ExecutionResponse::new(
            200, body,
        )))
    }

    /// Creates an executor with the given default answer.
    #[must_use]
    pub fn with_fallback(fallback: ScriptedExecution) -> Self {
        Self {
            state: Arc::new(RwLock::new(ExecutorState {
                scripted: VecDeque::new(),
                fallback,
                requests: Vec::new(),
            })),
        }
    }

    /// Queues a one-off answer.
    pub fn push(&self, answer: ScriptedExecution) {
        self.write_state().scripted.push_back(answer);
    }

    /// Returns the requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<ExecutionRequest> {
        match self.state.read() {
            Ok(state) => state.requests.clone(),
            Err(poisoned) => poisoned.into_inner().requests.clone(),
        }
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, ExecutorState> {
        self.state
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl AliasExecutor for InMemoryAliasExecutor {
    async fn execute(&self, request: &ExecutionRequest) -> ExecutorResult<ExecutionResponse> {
        let mut state = self.write_state();
        state.requests.push(request.clone());
        let answer = state
            .scripted
            .pop_front()
            .unwrap_or_else(|| state.fallback.clone());
        match answer {
            ScriptedExecution::Respond(response) => Ok(response),
            ScriptedExecution::Fail(message) => {
                Err(ExecutorError::transport(std::io::Error::other(message)))
            }
        }
    }
}
