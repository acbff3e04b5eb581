//! Relay configuration read from environment variables.
//!
//! Empty values and the literal string `null` are treated as unset.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:9101";
const DEFAULT_CHANNEL: &str = "hubot";
const DEFAULT_BOT_NAME: &str = "hubot";
const DEFAULT_ALIAS_PATH: &str = "/exp/actionalias";
const DEFAULT_EXECUTION_PATH: &str = "/exp/aliasexecution";
const DEFAULT_RELOAD_SECS: u64 = 120;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PORT: u16 = 8080;
const AUTH_PORT: u16 = 9100;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A URL variable does not hold an absolute URL.
    #[error("{name} is not a valid URL: {reason}")]
    InvalidUrl {
        /// Variable name.
        name: &'static str,
        /// Parser message.
        reason: String,
    },

    /// A numeric variable does not hold a number in range.
    #[error("{name} must be a positive whole number, got {value:?}")]
    InvalidNumber {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },

    /// The bind address is not an IP address.
    #[error("BIND_ADDRESS is not an IP address: {0:?}")]
    InvalidBindAddress(String),

    /// The auth URL cannot be derived from the API URL.
    #[error("cannot derive the auth URL from {0}")]
    UnderivableAuthUrl(String),
}

/// Settings for the relay process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Base URL of the automation service API.
    pub api_url: Url,
    /// Base URL of the token service.
    pub auth_url: Url,
    /// Path of the alias listing, appended to the API URL.
    pub alias_path: String,
    /// Path of alias execution, appended to the API URL.
    pub execution_path: String,
    /// Channel execution results are reported on.
    pub notification_channel: String,
    /// Interval between alias refreshes.
    pub refresh_interval: Duration,
    /// Timeout applied to every HTTP request.
    pub http_timeout: Duration,
    /// Token service user name.
    pub auth_username: Option<String>,
    /// Token service password.
    pub auth_password: Option<String>,
    /// Name the bot answers to in chat.
    pub bot_name: String,
    /// Address the result webhook listens on.
    pub listen_addr: SocketAddr,
}

impl RelayConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| is_set(value));

        let api_url = parse_url("ST2_API", read("ST2_API").as_deref().unwrap_or(DEFAULT_API_URL))?;
        let auth_url = match read("ST2_AUTH_URL") {
            Some(value) => parse_url("ST2_AUTH_URL", &value)?,
            None => derive_auth_url(&api_url)?,
        };
        let listen_ip = match read("BIND_ADDRESS") {
            Some(value) => value
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::InvalidBindAddress(value))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        let port = match read("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidNumber {
                    name: "PORT",
                    value,
                })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            api_url,
            auth_url,
            alias_path: api_path(read("ST2_ALIAS_PATH"), DEFAULT_ALIAS_PATH),
            execution_path: api_path(read("ST2_EXECUTION_PATH"), DEFAULT_EXECUTION_PATH),
            notification_channel: read("ST2_CHANNEL").unwrap_or_else(|| DEFAULT_CHANNEL.to_owned()),
            refresh_interval: seconds(
                "ST2_COMMANDS_RELOAD_INTERVAL",
                read("ST2_COMMANDS_RELOAD_INTERVAL"),
                DEFAULT_RELOAD_SECS,
            )?,
            http_timeout: seconds(
                "ST2_HTTP_TIMEOUT",
                read("ST2_HTTP_TIMEOUT"),
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?,
            auth_username: read("ST2_AUTH_USERNAME"),
            auth_password: read("ST2_AUTH_PASSWORD"),
            bot_name: read("HUBOT_NAME").unwrap_or_else(|| DEFAULT_BOT_NAME.to_owned()),
            listen_addr: SocketAddr::new(listen_ip, port),
        })
    }

    /// Returns the alias listing URL.
    #[must_use]
    pub fn alias_url(&self) -> String {
        join_url(&self.api_url, &self.alias_path)
    }

    /// Returns the alias execution URL.
    #[must_use]
    pub fn execution_url(&self) -> String {
        join_url(&self.api_url, &self.execution_path)
    }

    /// Returns the token issuing URL.
    #[must_use]
    pub fn tokens_url(&self) -> String {
        join_url(&self.auth_url, "/tokens")
    }
}

fn is_set(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed != "null"
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value.trim()).map_err(|err| ConfigError::InvalidUrl {
        name,
        reason: err.to_string(),
    })
}

fn derive_auth_url(api_url: &Url) -> Result<Url, ConfigError> {
    let mut auth_url = api_url.clone();
    auth_url
        .set_port(Some(AUTH_PORT))
        .map_err(|()| ConfigError::UnderivableAuthUrl(api_url.to_string()))?;
    auth_url.set_path("");
    auth_url.set_query(None);
    auth_url.set_fragment(None);
    Ok(auth_url)
}

fn seconds(name: &'static str, value: Option<String>, default: u64) -> Result<Duration, ConfigError> {
    let Some(raw) = value else {
        return Ok(Duration::from_secs(default));
    };
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidNumber { name, value: raw }),
    }
}

fn api_path(value: Option<String>, default: &str) -> String {
    let path = value.unwrap_or_else(|| default.to_owned());
    if path.starts_with('/') {
        path
    } else {
        format!("/{path}")
    }
}

/// Appends `path` to `base` textually so a path prefix on the base is kept.
fn join_url(base: &Url, path: &str) -> String {
    format!("{}{path}", base.as_str().trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, RelayConfig};
    use rstest::rstest;
    use std::collections::HashMap;
    use std::time::Duration;

    fn config_from(pairs: &[(&str, &str)]) -> Result<RelayConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        RelayConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).expect("defaults are valid");

        assert_eq!(config.api_url.as_str(), "http://localhost:9101/");
        assert_eq!(config.auth_url.as_str(), "http://localhost:9100/");
        assert_eq!(config.alias_url(), "http://localhost:9101/exp/actionalias");
        assert_eq!(
            config.execution_url(),
            "http://localhost:9101/exp/aliasexecution"
        );
        assert_eq!(config.tokens_url(), "http://localhost:9100/tokens");
        assert_eq!(config.notification_channel, "hubot");
        assert_eq!(config.bot_name, "hubot");
        assert_eq!(config.refresh_interval, Duration::from_secs(120));
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.listen_addr.to_string(), "0.0.0.0:8080");
        assert!(config.auth_username.is_none());
        assert!(config.auth_password.is_none());
    }

    #[rstest]
    #[case("")]
    #[case("null")]
    #[case("   ")]
    fn blank_and_null_values_count_as_unset(#[case] value: &str) {
        let config = config_from(&[
            ("ST2_CHANNEL", value),
            ("ST2_AUTH_USERNAME", value),
            ("ST2_COMMANDS_RELOAD_INTERVAL", value),
        ])
        .expect("unset values fall back to defaults");

        assert_eq!(config.notification_channel, "hubot");
        assert!(config.auth_username.is_none());
        assert_eq!(config.refresh_interval, Duration::from_secs(120));
    }

    #[rstest]
    fn api_prefix_is_kept_and_auth_url_derived() {
        let config = config_from(&[("ST2_API", "https://st2.example.com/api/")])
            .expect("valid API URL");

        assert_eq!(
            config.alias_url(),
            "https://st2.example.com/api/exp/actionalias"
        );
        assert_eq!(config.tokens_url(), "https://st2.example.com:9100/tokens");
    }

    #[rstest]
    fn explicit_values_override_defaults() {
        let config = config_from(&[
            ("ST2_AUTH_URL", "https://auth.example.com/auth"),
            ("ST2_ALIAS_PATH", "v1/actionalias"),
            ("ST2_COMMANDS_RELOAD_INTERVAL", "15"),
            ("ST2_HTTP_TIMEOUT", "5"),
            ("HUBOT_NAME", "stanley"),
            ("PORT", "9999"),
            ("BIND_ADDRESS", "127.0.0.1"),
        ])
        .expect("valid overrides");

        assert_eq!(config.tokens_url(), "https://auth.example.com/auth/tokens");
        assert_eq!(config.alias_url(), "http://localhost:9101/v1/actionalias");
        assert_eq!(config.refresh_interval, Duration::from_secs(15));
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert_eq!(config.bot_name, "stanley");
        assert_eq!(config.listen_addr.to_string(), "127.0.0.1:9999");
    }

    #[rstest]
    #[case("ST2_COMMANDS_RELOAD_INTERVAL", "0")]
    #[case("ST2_COMMANDS_RELOAD_INTERVAL", "soon")]
    #[case("ST2_HTTP_TIMEOUT", "-1")]
    #[case("PORT", "70000")]
    fn invalid_numbers_are_rejected(#[case] name: &str, #[case] value: &str) {
        let error = config_from(&[(name, value)]).expect_err("value is rejected");

        assert!(matches!(error, ConfigError::InvalidNumber { .. }));
    }

    #[rstest]
    fn invalid_urls_are_rejected() {
        let error = config_from(&[("ST2_API", "localhost without scheme")])
            .expect_err("relative URL is rejected");

        assert!(matches!(error, ConfigError::InvalidUrl { name: "ST2_API", .. }));
    }

    #[rstest]
    fn invalid_bind_address_is_rejected() {
        let error = config_from(&[("BIND_ADDRESS", "everywhere")]).expect_err("not an IP");

        assert!(matches!(error, ConfigError::InvalidBindAddress(_)));
    }
}
