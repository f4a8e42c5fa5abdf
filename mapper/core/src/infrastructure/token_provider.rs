// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Repository Token Providers
//!
//! - [`StaticTokenProvider`]: no token, or a fixed bearer token
//! - [`ClientCredentialsTokenProvider`]: OAuth2 client-credentials grant with
//!   a cached token that is refreshed on first use after expiry

use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::RwLock;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::http::check_status;
use crate::domain::auth::{AccessToken, TokenProvider};
use crate::domain::error::MapperError;
use crate::domain::mapper_config::{resolve_secret, RepositoryAuthConfig};

/// Tokens expiring within this window count as expired
pub const EXPIRY_SKEW_SECONDS: i64 = 30;

pub struct StaticTokenProvider {
    token: Option<AccessToken>,
}

impl StaticTokenProvider {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.map(|value| AccessToken::new(value, None)),
        }
    }

    pub fn anonymous() -> Self {
        Self { token: None }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn acquire(&self) -> Result<Option<AccessToken>, MapperError> {
        Ok(self.token.clone())
    }

    async fn refresh(&self, _rejected: Option<&AccessToken>) -> Result<Option<AccessToken>, MapperError> {
        Ok(self.token.clone())
    }

    fn is_expired(&self) -> bool {
        false
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

pub struct ClientCredentialsTokenProvider {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    scope: Option<String>,
    cached: RwLock<Option<AccessToken>>,
    // Serialises refreshes so concurrent callers hit the token endpoint once
    refresh_lock: Mutex<()>,
}

impl ClientCredentialsTokenProvider {
    pub fn new(
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        scope: Option<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scope,
            cached: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    fn valid_cached(&self) -> Option<AccessToken> {
        let cached = self.cached.read();
        cached
            .as_ref()
            .filter(|token| !token.is_expired_at(Utc::now(), Duration::seconds(EXPIRY_SKEW_SECONDS)))
            .cloned()
    }

    async fn fetch_token(&self) -> Result<AccessToken, MapperError> {
        let mut form = vec![
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        if let Some(scope) = &self.scope {
            form.push(("scope", scope.as_str()));
        }

        let response = self
            .client
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| MapperError::from(e).context("Failed to request repository token"))?;
        let response = check_status(response, "POST token endpoint")
            .await
            .map_err(|e| MapperError::unauthorized(e.message.clone()).context("Repository token request rejected"))?;
        let body: TokenResponse = response.json().await?;

        let expires_at = body.expires_in.map(|seconds| Utc::now() + Duration::seconds(seconds));
        let token = AccessToken::new(body.access_token, expires_at);
        info!(?expires_at, "Obtained repository access token");

        *self.cached.write() = Some(token.clone());
        Ok(token)
    }
}

#[async_trait]
impl TokenProvider for ClientCredentialsTokenProvider {
    async fn acquire(&self) -> Result<Option<AccessToken>, MapperError> {
        if let Some(token) = self.valid_cached() {
            return Ok(Some(token));
        }

        let _guard = self.refresh_lock.lock().await;
        // Another caller may have refreshed while we waited
        if let Some(token) = self.valid_cached() {
            return Ok(Some(token));
        }
        debug!("Repository token missing or expired, refreshing");
        self.fetch_token().await.map(Some)
    }

    async fn refresh(&self, rejected: Option<&AccessToken>) -> Result<Option<AccessToken>, MapperError> {
        let _guard = self.refresh_lock.lock().await;
        if let (Some(current), Some(rejected)) = (self.valid_cached(), rejected) {
            if &current != rejected {
                debug!("Rejected repository token already replaced");
                return Ok(Some(current));
            }
        }
        self.fetch_token().await.map(Some)
    }

    fn is_expired(&self) -> bool {
        self.valid_cached().is_none()
    }
}

/// Build the provider selected by the repository auth configuration
pub fn token_provider_from_config(config: &RepositoryAuthConfig) -> anyhow::Result<Arc<dyn TokenProvider>> {
    Ok(match config {
        RepositoryAuthConfig::None => Arc::new(StaticTokenProvider::anonymous()),
        RepositoryAuthConfig::Bearer { token } => Arc::new(StaticTokenProvider::new(Some(resolve_secret(token)?))),
        RepositoryAuthConfig::ClientCredentials {
            token_url,
            client_id,
            client_secret,
            scope,
        } => Arc::new(ClientCredentialsTokenProvider::new(
            token_url.clone(),
            client_id.clone(),
            resolve_secret(client_secret)?,
            scope.clone(),
        )),
    })
}
