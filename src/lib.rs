//! CRaaS API client library
//!
//! Typed access to the container registry as a service API. The v1 API
//! ([`v1::Client`]) covers registries, repositories, images, tags, garbage
//! collection and short-lived tokens; the v2 API ([`v2::Client`]) covers
//! access tokens. Both share the request plumbing in [`transport`].

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod transport;
pub mod v1;
pub mod v2;

pub use client::{ApiClient, ApiVersion, ClientBuilder};
pub use config::ClientConfig;
pub use error::{CraasError, Result};
pub use transport::{Classification, Outcome, RequestContext, Requests};
