//! Request/response plumbing shared by the v1 and v2 clients
//!
//! Every resource call goes through [`Requests::execute`], which signs the
//! request, runs it under a [`RequestContext`] and returns an [`Outcome`]
//! whose error responses are already classified.

pub mod context;
pub mod http;
pub mod outcome;
pub mod request;

pub use context::{CancelHandle, RequestContext};
pub use http::{TransportSettings, new_http_client};
pub use outcome::{Classification, Outcome, classify};
pub use request::{AUTH_TOKEN_HEADER, Requests};

/// Join the endpoint and path segments with `/`
pub(crate) fn join_url(endpoint: &str, segments: &[&str]) -> String {
    let mut url = endpoint.to_string();
    for segment in segments {
        url.push('/');
        url.push_str(segment);
    }
    url
}
