// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! AAS Repository Client
//!
//! [`AasRepository`] over the AAS Part 2 style REST API. Shell and submodel
//! ids are base64url-encoded (no padding) into path segments.
//!
//! Requests carry the bearer token of the injected [`TokenProvider`]. A 401
//! answer forces one token refresh and a single retry.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::sync::Arc;
use tracing::{debug, warn};

use super::http::{check_status, join_url};
use super::token_provider::token_provider_from_config;
use crate::domain::aas::{AssetAdministrationShell, Submodel};
use crate::domain::auth::{AccessToken, TokenProvider};
use crate::domain::error::MapperError;
use crate::domain::identifiers::encode_id;
use crate::domain::mapper_config::RepositoryConfig;
use crate::domain::repository::{AasRepository, ShellPage};

pub struct AasRepositoryClient {
    client: Client,
    endpoint: String,
    page_limit: u32,
    tokens: Arc<dyn TokenProvider>,
}

impl AasRepositoryClient {
    pub fn new(endpoint: impl Into<String>, page_limit: u32, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            page_limit,
            tokens,
        }
    }

    pub fn from_config(config: &RepositoryConfig) -> anyhow::Result<Self> {
        let tokens = token_provider_from_config(&config.auth)?;
        Ok(Self::new(config.endpoint.clone(), config.page_limit, tokens))
    }

    fn shell_path(shell_id: &str) -> String {
        format!("/shells/{}", encode_id(shell_id))
    }

    fn submodel_path(shell_id: &str, submodel_id: &str) -> String {
        format!("{}/submodels/{}", Self::shell_path(shell_id), encode_id(submodel_id))
    }

    fn authorize(request: RequestBuilder, token: Option<&AccessToken>) -> RequestBuilder {
        match token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {}", token.value)),
            None => request,
        }
    }

    /// Send the request built by `build`, retrying once with a fresh token on 401
    async fn send<F>(&self, operation: &str, build: F) -> Result<Response, MapperError>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let token = self.tokens.acquire().await?;
        let response = Self::authorize(build(&self.client), token.as_ref()).send().await?;

        if response.status() == StatusCode::UNAUTHORIZED && token.is_some() {
            warn!(operation, "Repository rejected token, refreshing and retrying once");
            let fresh = self.tokens.refresh(token.as_ref()).await?;
            let response = Self::authorize(build(&self.client), fresh.as_ref()).send().await?;
            return check_status(response, operation).await;
        }

        check_status(response, operation).await
    }
}

#[async_trait]
impl AasRepository for AasRepositoryClient {
    async fn post_shell(&self, shell: &AssetAdministrationShell) -> Result<u16, MapperError> {
        let url = join_url(&self.endpoint, "/shells");
        let response = self
            .send("POST /shells", |client| client.post(&url).json(shell))
            .await?;
        Ok(response.status().as_u16())
    }

    async fn update_shell(&self, shell: &AssetAdministrationShell) -> Result<u16, MapperError> {
        let path = Self::shell_path(shell.id());
        let url = join_url(&self.endpoint, &path);
        let response = self
            .send(&format!("PUT {}", path), |client| client.put(&url).json(shell))
            .await?;
        Ok(response.status().as_u16())
    }

    async fn get_all_shells(&self, cursor: Option<String>) -> Result<ShellPage, MapperError> {
        let url = join_url(&self.endpoint, "/shells");
        let mut query = vec![("limit", self.page_limit.to_string())];
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor));
        }

        let response = self
            .send("GET /shells", |client| client.get(&url).query(&query))
            .await?;
        let page: ShellPage = response.json().await?;
        debug!(count = page.result.len(), has_cursor = page.paging_metadata.cursor.is_some(), "Listed shells");
        Ok(page)
    }

    async fn get_shell(&self, shell_id: &str) -> Result<AssetAdministrationShell, MapperError> {
        let path = Self::shell_path(shell_id);
        let url = join_url(&self.endpoint, &path);
        let response = self
            .send(&format!("GET {}", path), |client| client.get(&url))
            .await?;
        Ok(response.json().await?)
    }

    async fn delete_shell(&self, shell_id: &str) -> Result<u16, MapperError> {
        let path = Self::shell_path(shell_id);
        let url = join_url(&self.endpoint, &path);
        let response = self
            .send(&format!("DELETE {}", path), |client| client.delete(&url))
            .await?;
        debug!(shell_id, "Deleted shell");
        Ok(response.status().as_u16())
    }

    async fn post_submodel(&self, shell_id: &str, submodel: &Submodel) -> Result<u16, MapperError> {
        let path = format!("{}/submodels", Self::shell_path(shell_id));
        let url = join_url(&self.endpoint, &path);
        let response = self
            .send(&format!("POST {}", path), |client| client.post(&url).json(submodel))
            .await?;
        Ok(response.status().as_u16())
    }

    async fn update_submodel(&self, shell_id: &str, submodel: &Submodel) -> Result<u16, MapperError> {
        let path = Self::submodel_path(shell_id, submodel.id());
        let url = join_url(&self.endpoint, &path);
        let response = self
            .send(&format!("PUT {}", path), |client| client.put(&url).json(submodel))
            .await?;
        Ok(response.status().as_u16())
    }

    async fn get_submodel(&self, shell_id: &str, submodel_id: &str) -> Result<Submodel, MapperError> {
        let path = Self::submodel_path(shell_id, submodel_id);
        let url = join_url(&self.endpoint, &path);
        let response = self
            .send(&format!("GET {}", path), |client| client.get(&url))
            .await?;
        Ok(response.json().await?)
    }

    async fn delete_submodel(&self, shell_id: &str, submodel_id: &str) -> Result<u16, MapperError> {
        let path = Self::submodel_path(shell_id, submodel_id);
        let url = join_url(&self.endpoint, &path);
        let response = self
            .send(&format!("DELETE {}", path), |client| client.delete(&url))
            .await?;
        Ok(response.status().as_u16())
    }
}
