//! Token operations for the v1 client

use super::require;
use crate::client::ApiClient;
use crate::error::Result;
use crate::transport::{Outcome, RequestContext};
use crate::v1::types::{CreateTokenOpts, Token};
use crate::v1::{Client, Resource};
use reqwest::Method;

pub struct TokenOperations<'a> {
    client: &'a Client,
}

impl<'a> TokenOperations<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Create a token; lives 12 hours unless `opts` says otherwise
    pub async fn create(
        &self,
        ctx: &RequestContext,
        opts: Option<CreateTokenOpts>,
    ) -> Result<(Token, Outcome)> {
        let opts = opts.unwrap_or_default();
        let url = format!(
            "{}?ttl={}",
            self.client.url(&[Resource::Token.as_str()]),
            opts.ttl
        );
        self.client
            .requests()
            .call_json(ctx, Method::POST, &url, None)
            .await
    }

    /// Token metadata; the API omits the token itself, so it is filled in
    /// from `token_id`
    pub async fn get(&self, ctx: &RequestContext, token_id: &str) -> Result<(Token, Outcome)> {
        require(token_id, "token id")?;

        let url = self.client.url(&[Resource::Token.as_str(), token_id]);
        let (mut token, outcome): (Token, Outcome) = self
            .client
            .requests()
            .call_json(ctx, Method::GET, &url, None)
            .await?;
        token.token = token_id.to_string();
        Ok((token, outcome))
    }

    pub async fn revoke(&self, ctx: &RequestContext, token_id: &str) -> Result<Outcome> {
        require(token_id, "token id")?;

        let url = self.client.url(&[Resource::Token.as_str(), token_id]);
        self.client
            .requests()
            .call(ctx, Method::DELETE, &url, None)
            .await
    }

    pub async fn refresh(&self, ctx: &RequestContext, token_id: &str) -> Result<(Token, Outcome)> {
        require(token_id, "token id")?;

        let url = self.client.url(&[
            Resource::Token.as_str(),
            token_id,
            Resource::Refresh.as_str(),
        ]);
        let (mut token, outcome): (Token, Outcome) = self
            .client
            .requests()
            .call_json(ctx, Method::POST, &url, None)
            .await?;
        token.token = token_id.to_string();
        Ok((token, outcome))
    }
}
