//! Error types for CRaaS API calls

pub mod payload;

use crate::client::ApiVersion;
use crate::transport::Outcome;
use thiserror::Error;

pub use payload::{GenericError, NotFoundError, NotFoundErrorDetail, StatusError};

pub type Result<T> = std::result::Result<T, CraasError>;

#[derive(Debug, Error)]
pub enum CraasError {
    /// Network failure before any response was obtained
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request cancelled")]
    Cancelled,

    #[error("request deadline exceeded")]
    DeadlineExceeded,

    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The response body could not be read to the end
    #[error("failed to read response body: {0}")]
    BodyRead(#[source] reqwest::Error),

    /// The response body was already taken by a previous extraction
    #[error("response body has already been consumed")]
    BodyConsumed,

    #[error("failed to decode response body: {0}")]
    Extract(#[source] serde_json::Error),

    #[error("failed to encode request body: {0}")]
    Json(#[from] serde_json::Error),

    /// A result could not be rendered as JSON for display
    #[error("failed to render output: {0}")]
    Output(#[source] serde_json::Error),

    /// The server answered with a status code of 400 or above
    #[error("{}", api_message(.0))]
    Api(Box<Outcome>),

    #[error("endpoint version mismatch: {endpoint} is not a {expected} endpoint")]
    EndpointVersionMismatch {
        expected: ApiVersion,
        endpoint: String,
    },

    #[error("{0} is empty")]
    EmptyParameter(&'static str),

    #[error("invalid token ttl: {0}")]
    InvalidTokenTtl(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl CraasError {
    /// Outcome of the failed call, when the server did answer
    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            CraasError::Api(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.outcome()
            .is_some_and(|outcome| outcome.status() == reqwest::StatusCode::NOT_FOUND)
    }
}

fn api_message(outcome: &Outcome) -> String {
    match outcome.err() {
        Some(err) => err.to_string(),
        None => StatusError::new(outcome.status().as_u16(), None).to_string(),
    }
}
