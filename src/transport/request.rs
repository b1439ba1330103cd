//! Authenticated request execution shared by every resource call

use crate::config::ClientConfig;
use crate::error::Result;
use crate::transport::context::RequestContext;
use crate::transport::outcome::Outcome;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";
const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP client plus the configuration every request is signed with
#[derive(Debug, Clone)]
pub struct Requests {
    http: Client,
    config: ClientConfig,
}

impl Requests {
    pub fn new(http: Client, config: ClientConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn http_client(&self) -> &Client {
        &self.http
    }

    /// Send one request and classify the response.
    ///
    /// `url` must be absolute. Responses with status >= 400 come back as an
    /// `Ok` outcome carrying the classified error; only transport failures,
    /// cancellation and unreadable error bodies are returned as `Err`.
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Outcome> {
        let url = Url::parse(url)?;
        tracing::debug!(%method, %url, has_body = body.is_some(), "sending request");

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(USER_AGENT, self.config.user_agent())
            .header(AUTH_TOKEN_HEADER, self.config.token());
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(body);
        }

        ctx.run(async move {
            let response = request.send().await?;
            let status = response.status();
            tracing::debug!(%method, %url, status = status.as_u16(), "received response");

            if status.as_u16() >= 400 {
                Outcome::from_error_response(response).await
            } else {
                Ok(Outcome::success(response))
            }
        })
        .await
    }

    /// Like [`Requests::execute`] with `payload` encoded as the JSON body
    pub async fn execute_json<B: Serialize + ?Sized>(
        &self,
        ctx: &RequestContext,
        method: Method,
        url: &str,
        payload: &B,
    ) -> Result<Outcome> {
        let body = serde_json::to_vec(payload)?;
        self.execute(ctx, method, url, Some(body)).await
    }

    /// Execute and turn error statuses into [`crate::CraasError::Api`]
    pub async fn call(
        &self,
        ctx: &RequestContext,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Outcome> {
        self.execute(ctx, method, url, body).await?.into_result()
    }

    /// Execute, fail on error statuses, then decode the body into `T`
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<(T, Outcome)> {
        let mut outcome = self.call(ctx, method, url, body).await?;
        let value = outcome.extract_into().await?;
        Ok((value, outcome))
    }
}
