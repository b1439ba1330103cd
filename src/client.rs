//! Versioned client construction
//!
//! The v1 and v2 APIs are incompatible, so each has its own client type. Both
//! are built through [`ClientBuilder`], which refuses endpoints that belong to
//! the other API generation.

use crate::config::ClientConfig;
use crate::error::{CraasError, Result};
use crate::transport::{Requests, TransportSettings};
use std::fmt;
use std::marker::PhantomData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    V1,
    V2,
}

impl ApiVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V2 => "v2",
        }
    }

    /// API generation an endpoint belongs to, judged by its last characters
    pub fn detect(endpoint: &str) -> Option<Self> {
        let endpoint = endpoint.trim_end_matches('/');
        if endpoint.ends_with(ApiVersion::V1.as_str()) {
            Some(ApiVersion::V1)
        } else if endpoint.ends_with(ApiVersion::V2.as_str()) {
            Some(ApiVersion::V2)
        } else {
            None
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fail unless `endpoint` ends with the `expected` version tag
pub fn check_endpoint(expected: ApiVersion, endpoint: &str) -> Result<()> {
    if ApiVersion::detect(endpoint) == Some(expected) {
        Ok(())
    } else {
        Err(CraasError::EndpointVersionMismatch {
            expected,
            endpoint: endpoint.to_string(),
        })
    }
}

mod sealed {
    use crate::transport::Requests;

    pub trait Sealed {
        fn from_requests(requests: Requests) -> Self;
    }
}

/// Common accessors of the v1 and v2 clients
pub trait ApiClient: sealed::Sealed + Sized {
    const VERSION: ApiVersion;

    fn requests(&self) -> &Requests;

    fn token(&self) -> &str {
        self.requests().config().token()
    }

    fn endpoint(&self) -> &str {
        self.requests().config().endpoint()
    }

    fn user_agent(&self) -> &str {
        self.requests().config().user_agent()
    }

    fn builder(token: impl Into<String>, endpoint: impl Into<String>) -> ClientBuilder<Self> {
        ClientBuilder::new(token, endpoint)
    }
}

pub(crate) use sealed::Sealed;

/// Reject an empty required path parameter before any request is sent
pub(crate) fn require(value: &str, name: &'static str) -> Result<()> {
    if value.is_empty() {
        Err(CraasError::EmptyParameter(name))
    } else {
        Ok(())
    }
}

/// Builds a client for API generation `C`
pub struct ClientBuilder<C> {
    config: ClientConfig,
    http: Option<reqwest::Client>,
    settings: TransportSettings,
    _client: PhantomData<fn() -> C>,
}

impl<C: ApiClient> ClientBuilder<C> {
    pub fn new(token: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::from_config(ClientConfig::new(token, endpoint))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            http: None,
            settings: TransportSettings::default(),
            _client: PhantomData,
        }
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config = self.config.with_user_agent(user_agent);
        self
    }

    /// Use a caller-supplied HTTP client instead of the default one
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Settings for the default HTTP client; ignored when
    /// [`ClientBuilder::http_client`] is used
    pub fn transport_settings(mut self, settings: TransportSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn build(self) -> Result<C> {
        check_endpoint(C::VERSION, self.config.endpoint())?;

        let http = match self.http {
            Some(http) => http,
            None => self.settings.build_client()?,
        };

        let endpoint = self.config.endpoint().trim_end_matches('/').to_string();
        let config = ClientConfig::new(self.config.token(), endpoint)
            .with_user_agent(self.config.user_agent());

        tracing::debug!(version = %C::VERSION, endpoint = config.endpoint(), "client configured");
        Ok(C::from_requests(Requests::new(http, config)))
    }
}
