//! Repository, image and tag operations for the v1 client
//!
//! All paths live under `registries/{registry_id}/repositories/{name}`.
//! Image references may be a tag or a digest.

use super::require;
use crate::client::ApiClient;
use crate::error::Result;
use crate::transport::{Outcome, RequestContext};
use crate::v1::types::{Image, Layer, Repository};
use crate::v1::{Client, Resource};
use reqwest::Method;

pub struct RepositoryOperations<'a> {
    client: &'a Client,
}

impl<'a> RepositoryOperations<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn repositories_url(&self, registry_id: &str, rest: &[&str]) -> String {
        let mut segments = vec![
            Resource::Registries.as_str(),
            registry_id,
            Resource::Repositories.as_str(),
        ];
        segments.extend_from_slice(rest);
        self.client.url(&segments)
    }

    pub async fn list_repositories(
        &self,
        ctx: &RequestContext,
        registry_id: &str,
    ) -> Result<(Vec<Repository>, Outcome)> {
        require(registry_id, "registry id")?;

        let url = self.repositories_url(registry_id, &[]);
        self.client
            .requests()
            .call_json(ctx, Method::GET, &url, None)
            .await
    }

    pub async fn get_repository(
        &self,
        ctx: &RequestContext,
        registry_id: &str,
        repository: &str,
    ) -> Result<(Repository, Outcome)> {
        require(registry_id, "registry id")?;
        require(repository, "repository name")?;

        let url = self.repositories_url(registry_id, &[repository]);
        self.client
            .requests()
            .call_json(ctx, Method::GET, &url, None)
            .await
    }

    pub async fn delete_repository(
        &self,
        ctx: &RequestContext,
        registry_id: &str,
        repository: &str,
    ) -> Result<Outcome> {
        require(registry_id, "registry id")?;
        require(repository, "repository name")?;

        let url = self.repositories_url(registry_id, &[repository]);
        self.client
            .requests()
            .call(ctx, Method::DELETE, &url, None)
            .await
    }

    pub async fn list_images(
        &self,
        ctx: &RequestContext,
        registry_id: &str,
        repository: &str,
    ) -> Result<(Vec<Image>, Outcome)> {
        require(registry_id, "registry id")?;
        require(repository, "repository name")?;

        let url = self.repositories_url(registry_id, &[repository, Resource::Images.as_str()]);
        self.client
            .requests()
            .call_json(ctx, Method::GET, &url, None)
            .await
    }

    pub async fn list_tags(
        &self,
        ctx: &RequestContext,
        registry_id: &str,
        repository: &str,
    ) -> Result<(Vec<String>, Outcome)> {
        require(registry_id, "registry id")?;
        require(repository, "repository name")?;

        let url = self.repositories_url(registry_id, &[repository, Resource::Tags.as_str()]);
        self.client
            .requests()
            .call_json(ctx, Method::GET, &url, None)
            .await
    }

    /// Layers of `image`, given as a tag or a digest
    pub async fn list_image_layers(
        &self,
        ctx: &RequestContext,
        registry_id: &str,
        repository: &str,
        image: &str,
    ) -> Result<(Vec<Layer>, Outcome)> {
        require(registry_id, "registry id")?;
        require(repository, "repository name")?;
        require(image, "image name")?;

        let url = self.repositories_url(registry_id, &[repository, image]);
        self.client
            .requests()
            .call_json(ctx, Method::GET, &url, None)
            .await
    }

    pub async fn delete_image_manifest(
        &self,
        ctx: &RequestContext,
        registry_id: &str,
        repository: &str,
        image: &str,
    ) -> Result<Outcome> {
        require(registry_id, "registry id")?;
        require(repository, "repository name")?;
        require(image, "image name")?;

        let url = self.repositories_url(registry_id, &[repository, image]);
        self.client
            .requests()
            .call(ctx, Method::DELETE, &url, None)
            .await
    }
}
