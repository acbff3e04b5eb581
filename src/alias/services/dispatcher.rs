//! Dispatch of resolved commands to the remote executor.

use minijinja::{Environment, context};
use rand::seq::SliceRandom;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::Instrument;

use crate::alias::{
    domain::{DispatchContext, DispatchId, ExecutionRequest, ResolvedMatch},
    ports::AliasExecutor,
};

const SUCCESS_STATUS: u16 = 200;

/// Acknowledgements sent when the executor accepts a command.
pub const ACKNOWLEDGEMENT_TEMPLATES: [&str; 9] = [
    "I'll take it from here! Your execution ID for reference is {{ execution_id }}",
    "Got it! Remember {{ execution_id }} as your execution ID",
    "I'm on it! Your execution ID is {{ execution_id }}",
    "Let me get right on that. Remember {{ execution_id }} as your execution ID",
    "Always something with you. :) I'll take care of that. Your ID is {{ execution_id }}",
    "I have it covered. Your execution ID is {{ execution_id }}",
    "Let me start up the machine! Your execution ID is {{ execution_id }}",
    "I'll throw that task in the oven and get cookin'! Your execution ID is {{ execution_id }}",
    "Want me to take that off your hand? You got it! Don't forget your execution ID: {{ execution_id }}",
];

/// Result of one dispatch, ready to be reported in chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The executor accepted the command.
    Accepted {
        /// Execution identifier reported by the executor.
        execution_id: String,
        /// Rendered acknowledgement.
        acknowledgement: String,
    },
    /// The executor answered with a non-success status.
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },
    /// No answer could be obtained from the executor.
    TransportFailed {
        /// Transport error description.
        reason: String,
    },
}

impl DispatchOutcome {
    /// Returns `true` when the executor accepted the command.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Returns the chat message reporting this outcome.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DispatchOutcome {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted {
                acknowledgement, ..
            } => formatter.write_str(acknowledgement),
            Self::Rejected { status, body } => write!(formatter, "status code \"{status}\": {body}"),
            Self::TransportFailed { reason } => write!(formatter, "error : {reason}"),
        }
    }
}

/// Builds execution requests and submits them to an [`AliasExecutor`].
///
/// Dispatch never fails: every result, including transport errors, becomes
/// a [`DispatchOutcome`] for the requesting user. No retries are attempted.
pub struct Dispatcher<E>
where
    E: AliasExecutor,
{
    executor: Arc<E>,
    notification_channel: String,
}

impl<E> Dispatcher<E>
where
    E: AliasExecutor,
{
    /// Creates a dispatcher posting results to `notification_channel`.
    #[must_use]
    pub fn new(executor: Arc<E>, notification_channel: impl Into<String>) -> Self {
        Self {
            executor,
            notification_channel: notification_channel.into(),
        }
    }

    /// Returns the channel the executor is asked to notify.
    #[must_use]
    pub fn notification_channel(&self) -> &str {
        &self.notification_channel
    }

    /// Submits `resolved` on behalf of the user in `context`.
    pub async fn dispatch(
        &self,
        resolved: &ResolvedMatch,
        context: &DispatchContext,
    ) -> DispatchOutcome {
        let dispatch_id = DispatchId::new();
        let request =
            ExecutionRequest::from_match(resolved, context, self.notification_channel.as_str());
        let span = tracing::info_span!(
            "dispatch",
            %dispatch_id,
            alias = %request.name,
            user = %request.user,
        );
        self.submit(request).instrument(span).await
    }

    async fn submit(&self, request: ExecutionRequest) -> DispatchOutcome {
        tracing::debug!(payload = ?request, "sending command payload");
        let outcome = match self.executor.execute(&request).await {
            Err(error) => DispatchOutcome::TransportFailed {
                reason: error.to_string(),
            },
            Ok(response) if response.status != SUCCESS_STATUS => DispatchOutcome::Rejected {
                status: response.status,
                body: response.body,
            },
            Ok(response) => {
                let execution_id = execution_id_from_body(&response.body);
                let acknowledgement = acknowledge(&execution_id);
                DispatchOutcome::Accepted {
                    execution_id,
                    acknowledgement,
                }
            }
        };

        if outcome.is_accepted() {
            tracing::info!("execution accepted");
        } else {
            tracing::warn!(outcome = %outcome, "execution not accepted");
        }
        outcome
    }
}

/// Extracts the execution identifier from an executor response body.
///
/// JSON objects contribute their `id` (or `execution.id`) field and JSON
/// strings their value; any other body is used verbatim, trimmed.
#[must_use]
pub fn execution_id_from_body(body: &str) -> String {
    let from_json = match serde_json::from_str::<Value>(body) {
        Ok(Value::String(text)) => Some(text),
        Ok(Value::Object(fields)) => fields
            .get("id")
            .or_else(|| fields.get("execution").and_then(|execution| execution.get("id")))
            .and_then(Value::as_str)
            .map(str::to_owned),
        _ => None,
    };
    from_json.unwrap_or_else(|| body.trim().to_owned())
}

/// Renders a randomly chosen acknowledgement for `execution_id`.
#[must_use]
pub fn acknowledge(execution_id: &str) -> String {
    let template = ACKNOWLEDGEMENT_TEMPLATES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("Your execution ID is {{ execution_id }}");
    render_acknowledgement(template, execution_id)
}

/// Renders one acknowledgement template for `execution_id`.
#[must_use]
pub fn render_acknowledgement(template: &str, execution_id: &str) -> String {
    let environment = Environment::new();
    environment
        .render_str(template, context! { execution_id => execution_id })
        .unwrap_or_else(|error| {
            tracing::warn!(%error, "acknowledgement template failed to render");
            format!("Your execution ID is {execution_id}")
        })
}
