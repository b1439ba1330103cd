//! Client for the v1 API: registries, repositories, garbage collection and tokens

pub mod operations;
pub mod types;

use crate::client::{ApiClient, ApiVersion, ClientBuilder, Sealed};
use crate::error::Result;
use crate::transport::Requests;

pub use operations::{GcOperations, RegistryOperations, RepositoryOperations, TokenOperations};
pub use types::*;

/// Path segments understood by the v1 API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Token,
    Refresh,
    Registries,
    Repositories,
    GarbageCollection,
    Size,
    Images,
    Tags,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Token => "token",
            Resource::Refresh => "refresh",
            Resource::Registries => "registries",
            Resource::Repositories => "repositories",
            Resource::GarbageCollection => "garbage-collection",
            Resource::Size => "size",
            Resource::Images => "images",
            Resource::Tags => "tags",
        }
    }
}

/// v1 API client; cheap to clone and safe to share between tasks
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
    const VERSION: ApiVersion = ApiVersion::V1;

    fn requests(&self) -> &Requests {
        &self.requests
    }
}

impl Client {
    /// Client with the default HTTP transport.
    ///
    /// `endpoint` must end with `v1`.
    pub fn new(token: impl Into<String>, endpoint: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(token, endpoint).build()
    }

    /// Client using `http` as transport, or the default one when `None`
    pub fn with_http_client(
        http: Option<reqwest::Client>,
        token: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Result<Self> {
        let builder = ClientBuilder::new(token, endpoint);
        match http {
            Some(http) => builder.http_client(http).build(),
            None => builder.build(),
        }
    }

    pub fn registries(&self) -> RegistryOperations<'_> {
        RegistryOperations::new(self)
    }

    pub fn repositories(&self) -> RepositoryOperations<'_> {
        RepositoryOperations::new(self)
    }

    pub fn gc(&self) -> GcOperations<'_> {
        GcOperations::new(self)
    }

    pub fn tokens(&self) -> TokenOperations<'_> {
        TokenOperations::new(self)
    }

    pub(crate) fn url(&self, segments: &[&str]) -> String {
        crate::transport::join_url(self.endpoint(), segments)
    }
}
