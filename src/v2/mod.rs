//! Client for the v2 API (tokens)

pub mod operations;
pub mod types;

use crate::client::{ApiClient, ApiVersion, ClientBuilder, Sealed};
use crate::error::Result;
use crate::transport::Requests;

pub use operations::TokenOperations;
pub use types::*;

/// Path segments understood by the v2 API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Tokens,
    Refresh,
    Revoke,
    Regenerate,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Tokens => "tokens",
            Resource::Refresh => "refresh",
            Resource::Revoke => "revoke",
            Resource::Regenerate => "regenerate",
        }
    }
}

/// v2 API client; cheap to clone and safe to share between tasks
#[derive(Debug, Clone)]
pub struct Client {
    requests: Requests,
}

impl Sealed for Client {
    fn from_requests(requests: Requests) -> Self {
        Self { requests }
    }
}

impl ApiClient for Client {
    const VERSION: ApiVersion = ApiVersion::V2;

    fn requests(&self) -> &Requests {
        &self.requests
    }
}

impl Client {
    /// Client with the default HTTP transport.
    ///
    /// `endpoint` must end with `v2`.
    pub fn new(token: impl Into<String>, endpoint: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(token, endpoint).build()
    }

    pub fn tokens(&self) -> TokenOperations<'_> {
        TokenOperations::new(self)
    }

    pub(crate) fn url(&self, segments: &[&str]) -> String {
        crate::transport::join_url(self.endpoint(), segments)
    }
}
