//! Registry operations for the v1 client

use super::require;
use crate::client::ApiClient;
use crate::error::Result;
use crate::transport::{Outcome, RequestContext};
use crate::v1::types::{CreateRegistryOpts, Registry};
use crate::v1::{Client, Resource};
use reqwest::Method;

pub struct RegistryOperations<'a> {
    client: &'a Client,
}

impl<'a> RegistryOperations<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Create a registry named `name`
    pub async fn create(&self, ctx: &RequestContext, name: &str) -> Result<(Registry, Outcome)> {
        require(name, "registry name")?;

        let body = serde_json::to_vec(&CreateRegistryOpts { name })?;
        let url = self.client.url(&[Resource::Registries.as_str()]);
        self.client
            .requests()
            .call_json(ctx, Method::POST, &url, Some(body))
            .await
    }

    pub async fn list(&self, ctx: &RequestContext) -> Result<(Vec<Registry>, Outcome)> {
        let url = self.client.url(&[Resource::Registries.as_str()]);
        self.client
            .requests()
            .call_json(ctx, Method::GET, &url, None)
            .await
    }

    pub async fn get(
        &self,
        ctx: &RequestContext,
        registry_id: &str,
    ) -> Result<(Registry, Outcome)> {
        require(registry_id, "registry id")?;

        let url = self.client.url(&[Resource::Registries.as_str(), registry_id]);
        self.client
            .requests()
            .call_json(ctx, Method::GET, &url, None)
            .await
    }

    pub async fn delete(&self, ctx: &RequestContext, registry_id: &str) -> Result<Outcome> {
        require(registry_id, "registry id")?;

        let url = self.client.url(&[Resource::Registries.as_str(), registry_id]);
        self.client
            .requests()
            .call(ctx, Method::DELETE, &url, None)
            .await
    }
}
