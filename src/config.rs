//! Client configuration and environment loading

use crate::error::{CraasError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// Default `User-Agent` sent with every request
pub const USER_AGENT: &str = concat!("craas-client/", env!("CARGO_PKG_VERSION"));

pub const TOKEN_ENV: &str = "CRAAS_TOKEN";
pub const ENDPOINT_ENV: &str = "CRAAS_ENDPOINT";
pub const USER_AGENT_ENV: &str = "CRAAS_USER_AGENT";

/// Token, endpoint and user agent used to authenticate and address every call.
///
/// Immutable once built. `Debug` output never includes the token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    token: String,
    endpoint: String,
    #[serde(default = "default_user_agent")]
    user_agent: String,
}

fn default_user_agent() -> String {
    USER_AGENT.to_string()
}

impl ClientConfig {
    pub fn new(token: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            endpoint: endpoint.into(),
            user_agent: default_user_agent(),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Load from `CRAAS_TOKEN`, `CRAAS_ENDPOINT` and optional `CRAAS_USER_AGENT`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_ENV)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| CraasError::Config(format!("{} not set", TOKEN_ENV)))?;
        let endpoint = lookup(ENDPOINT_ENV)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| CraasError::Config(format!("{} not set", ENDPOINT_ENV)))?;

        let config = Self::new(token, endpoint);
        Ok(match lookup(USER_AGENT_ENV).filter(|v| !v.is_empty()) {
            Some(user_agent) => config.with_user_agent(user_agent),
            None => config,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
