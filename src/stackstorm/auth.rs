//! Token authentication against the automation service.

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::config::RelayConfig;

/// User name and password for the token service.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// User name.
    pub username: String,
    /// Password.
    pub password: String,
}

impl Credentials {
    /// Creates credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Token attached to requests as `X-Auth-Token`.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wraps a token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("AuthToken(<redacted>)")
    }
}

/// Errors raised while obtaining a token.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token service could not be reached.
    #[error("token request failed: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The token service refused the credentials.
    #[error("token request rejected with status {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// The token response did not contain a token.
    #[error("malformed token response: {0}")]
    MalformedResponse(String),
}

impl AuthError {
    /// Wraps a transport error from the authenticator.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}

/// Port for exchanging credentials for a token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Requests a token for `credentials`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when no token could be obtained.
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthToken, AuthError>;
}

/// How the relay starts: with a token, or talking to the API directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupPlan {
    /// Obtain a token first and attach it to every request.
    Authenticate(Credentials),
    /// Send requests without a token.
    Direct,
}

impl StartupPlan {
    /// Chooses the plan from the configured credentials.
    #[must_use]
    pub fn from_config(config: &RelayConfig) -> Self {
        Self::from_parts(config.auth_username.as_deref(), config.auth_password.as_deref())
    }

    /// Chooses [`StartupPlan::Authenticate`] when both a user name and a
    /// password are given.
    #[must_use]
    pub fn from_parts(username: Option<&str>, password: Option<&str>) -> Self {
        match (username, password) {
            (Some(user), Some(secret)) => Self::Authenticate(Credentials::new(user, secret)),
            (None, None) => Self::Direct,
            _ => {
                tracing::warn!(
                    "only one of ST2_AUTH_USERNAME and ST2_AUTH_PASSWORD is set; not authenticating"
                );
                Self::Direct
            }
        }
    }

    /// Obtains the token this plan calls for, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when authentication is required and fails.
    pub async fn token<A>(&self, authenticator: &A) -> Result<Option<AuthToken>, AuthError>
    where
        A: Authenticator + ?Sized,
    {
        match self {
            Self::Direct => Ok(None),
            Self::Authenticate(credentials) => {
                let token = authenticator.authenticate(credentials).await?;
                tracing::info!(username = %credentials.username, "obtained API token");
                Ok(Some(token))
            }
        }
    }
}

/// Body of a token service response.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub(crate) token: AuthToken,
}
