//! Token operations for the v2 client

use crate::client::{ApiClient, require};
use crate::error::Result;
use crate::transport::{Outcome, RequestContext};
use crate::v2::types::{Expiration, ListOpts, PatchTokenOpts, Scope, TokenList, TokenV2};
use crate::v2::{Client, Resource};
use reqwest::Method;

pub struct TokenOperations<'a> {
    client: &'a Client,
}

impl<'a> TokenOperations<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn token_url(&self, token_id: &str, action: Option<Resource>) -> String {
        match action {
            Some(action) => self
                .client
                .url(&[Resource::Tokens.as_str(), token_id, action.as_str()]),
            None => self.client.url(&[Resource::Tokens.as_str(), token_id]),
        }
    }

    /// Create a token; `docker_config` is sent as the `docker-config` query flag
    pub async fn create(
        &self,
        ctx: &RequestContext,
        token: &TokenV2,
        docker_config: Option<bool>,
    ) -> Result<(TokenV2, Outcome)> {
        let mut url = self.client.url(&[Resource::Tokens.as_str()]);
        if let Some(docker_config) = docker_config {
            url.push_str(&format!("?docker-config={}", docker_config));
        }

        let body = serde_json::to_vec(token)?;
        self.client
            .requests()
            .call_json(ctx, Method::POST, &url, Some(body))
            .await
    }

    pub async fn list(
        &self,
        ctx: &RequestContext,
        opts: &ListOpts,
    ) -> Result<(TokenList, Outcome)> {
        let mut url = self.client.url(&[Resource::Tokens.as_str()]);
        let query = opts.query_string();
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }

        self.client
            .requests()
            .call_json(ctx, Method::GET, &url, None)
            .await
    }

    /// Token metadata by id; the returned `token` is set to `token_id`
    pub async fn get(&self, ctx: &RequestContext, token_id: &str) -> Result<(TokenV2, Outcome)> {
        require(token_id, "token id")?;

        let url = self.token_url(token_id, None);
        let (mut token, outcome): (TokenV2, Outcome) = self
            .client
            .requests()
            .call_json(ctx, Method::GET, &url, None)
            .await?;
        token.token = Some(token_id.to_string());
        Ok((token, outcome))
    }

    pub async fn revoke(&self, ctx: &RequestContext, token_id: &str) -> Result<Outcome> {
        require(token_id, "token id")?;

        let url = self.token_url(token_id, Some(Resource::Revoke));
        self.client
            .requests()
            .call(ctx, Method::POST, &url, None)
            .await
    }

    /// Move the expiry of a token
    pub async fn refresh(
        &self,
        ctx: &RequestContext,
        token_id: &str,
        expiration: &Expiration,
    ) -> Result<(TokenV2, Outcome)> {
        require(token_id, "token id")?;

        let url = self.token_url(token_id, Some(Resource::Refresh));
        let body = serde_json::to_vec(expiration)?;
        self.client
            .requests()
            .call_json(ctx, Method::POST, &url, Some(body))
            .await
    }

    /// Issue a new secret for a token, with a new expiry
    pub async fn regenerate(
        &self,
        ctx: &RequestContext,
        token_id: &str,
        expiration: &Expiration,
    ) -> Result<(TokenV2, Outcome)> {
        require(token_id, "token id")?;

        let url = self.token_url(token_id, Some(Resource::Regenerate));
        let body = serde_json::to_vec(expiration)?;
        self.client
            .requests()
            .call_json(ctx, Method::POST, &url, Some(body))
            .await
    }

    pub async fn delete(&self, ctx: &RequestContext, token_id: &str) -> Result<Outcome> {
        require(token_id, "token id")?;

        let url = self.token_url(token_id, None);
        self.client
            .requests()
            .call(ctx, Method::DELETE, &url, None)
            .await
    }

    /// Rename a token and replace its scope; an empty `name` keeps the old one
    pub async fn patch(
        &self,
        ctx: &RequestContext,
        token_id: &str,
        name: &str,
        scope: &Scope,
    ) -> Result<(TokenV2, Outcome)> {
        require(token_id, "token id")?;

        let url = self.token_url(token_id, None);
        let opts = PatchTokenOpts {
            name: Some(name).filter(|name| !name.is_empty()),
            scope,
        };
        let body = serde_json::to_vec(&opts)?;
        self.client
            .requests()
            .call_json(ctx, Method::PATCH, &url, Some(body))
            .await
    }
}
