//! HTTP adapter for the automation service API.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use thiserror::Error;

use super::auth::{AuthError, AuthToken, Authenticator, Credentials, TokenResponse};
use crate::alias::{
    domain::{AliasDefinition, ExecutionRequest, decode_alias_list},
    ports::{
        AliasExecutor, AliasSource, AliasSourceError, AliasSourceResult, ExecutionResponse,
        ExecutorError, ExecutorResult,
    },
};
use crate::config::RelayConfig;

const AUTH_HEADER: &str = "X-Auth-Token";

/// Errors raised while constructing the client.
#[derive(Debug, Error)]
pub enum ClientSetupError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// Client for alias listing, alias execution and token requests.
#[derive(Debug, Clone)]
pub struct StackStormClient {
    http: Client,
    alias_url: String,
    execution_url: String,
    tokens_url: String,
    token: Option<AuthToken>,
}

impl StackStormClient {
    /// Builds a client for the endpoints in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientSetupError`] when the HTTP client cannot be built.
    pub fn from_config(config: &RelayConfig) -> Result<Self, ClientSetupError> {
        let http = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(ClientSetupError::Build)?;
        Ok(Self {
            http,
            alias_url: config.alias_url(),
            execution_url: config.execution_url(),
            tokens_url: config.tokens_url(),
            token: None,
        })
    }

    /// Returns a client attaching `token` to API requests.
    #[must_use]
    pub fn with_token(mut self, token: Option<AuthToken>) -> Self {
        self.token = token;
        self
    }

    /// Returns `true` when requests carry a token.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn authorized(&self, mut request: RequestBuilder) -> RequestBuilder {
        if let Some(token) = &self.token {
            request = request.header(AUTH_HEADER, token.as_str());
        }
        request
    }
}

#[async_trait]
impl AliasSource for StackStormClient {
    async fn fetch_aliases(&self) -> AliasSourceResult<Vec<AliasDefinition>> {
        let response = self
            .authorized(self.http.get(&self.alias_url))
            .send()
            .await
            .map_err(AliasSourceError::transport)?;
        let status = response.status();
        let body = response.text().await.map_err(AliasSourceError::transport)?;
        if !status.is_success() {
            return Err(AliasSourceError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(decode_alias_list(&body)?)
    }
}

#[async_trait]
impl AliasExecutor for StackStormClient {
    async fn execute(&self, request: &ExecutionRequest) -> ExecutorResult<ExecutionResponse> {
        let response = self
            .authorized(self.http.post(&self.execution_url).json(request))
            .send()
            .await
            .map_err(ExecutorError::transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(ExecutorError::transport)?;
        Ok(ExecutionResponse::new(status, body))
    }
}

#[async_trait]
impl Authenticator for StackStormClient {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthToken, AuthError> {
        let response = self
            .http
            .post(&self.tokens_url)
            .basic_auth(&credentials.username, Some(&credentials.password))
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(AuthError::transport)?;
        let status = response.status();
        let body = response.text().await.map_err(AuthError::transport)?;
        if !status.is_success() {
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_str::<TokenResponse>(&body)
            .map(|parsed| parsed.token)
            .map_err(|err| AuthError::MalformedResponse(err.to_string()))
    }
}
