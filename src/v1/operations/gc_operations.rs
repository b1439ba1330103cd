//! Garbage collection operations for the v1 client

use super::require;
use crate::client::ApiClient;
use crate::error::Result;
use crate::transport::{Outcome, RequestContext};
use crate::v1::types::{GarbageSize, StartGcOpts};
use crate::v1::{Client, Resource};
use reqwest::Method;

pub struct GcOperations<'a> {
    client: &'a Client,
}

impl<'a> GcOperations<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Start a garbage collection run in `registry_id`
    pub async fn start(
        &self,
        ctx: &RequestContext,
        registry_id: &str,
        opts: Option<StartGcOpts>,
    ) -> Result<Outcome> {
        require(registry_id, "registry id")?;
        let opts = opts.unwrap_or_default();

        let mut url = self.client.url(&[
            Resource::Registries.as_str(),
            registry_id,
            Resource::GarbageCollection.as_str(),
        ]);
        if opts.delete_untagged {
            url.push_str("?delete-untagged=true");
        }

        self.client
            .requests()
            .call(ctx, Method::POST, &url, None)
            .await
    }

    pub async fn garbage_size(
        &self,
        ctx: &RequestContext,
        registry_id: &str,
    ) -> Result<(GarbageSize, Outcome)> {
        require(registry_id, "registry id")?;

        let url = self.client.url(&[
            Resource::Registries.as_str(),
            registry_id,
            Resource::GarbageCollection.as_str(),
            Resource::Size.as_str(),
        ]);
        self.client
            .requests()
            .call_json(ctx, Method::GET, &url, None)
            .await
    }
}
