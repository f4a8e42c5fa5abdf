// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Netilion REST Client
//!
//! Anti-corruption layer towards the Netilion API.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** [`NetilionSource`] over `reqwest`
//! - **Integration:** Netilion REST API → domain records
//!
//! The caller's credential is forwarded unchanged in `Authorization`; the
//! configured API key goes into `Api-Key`. List endpoints answer with the
//! resource plural as key plus a `pagination` block:
//!
//! ```text
//! GET /assets?page=2&per_page=100
//! {"assets": [...], "pagination": {"page": 2, "next": "..."}}
//! ```

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::http::{check_status, join_url};
use crate::domain::error::MapperError;
use crate::domain::mapper_config::{resolve_secret, NetilionConfig};
use crate::domain::netilion::{
    ListPage, NetilionAsset, NetilionCategory, NetilionDocument, NetilionManufacturer,
    NetilionProduct, NetilionSoftware, NetilionSpecification, Pagination,
};
use crate::domain::source::{NetilionSource, SourceCredential};

pub struct NetilionClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    per_page: u32,
}

impl NetilionClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, per_page: u32) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key,
            per_page,
        }
    }

    pub fn from_config(config: &NetilionConfig) -> anyhow::Result<Self> {
        let api_key = config.api_key.as_deref().map(resolve_secret).transpose()?;
        Ok(Self::new(config.endpoint.clone(), api_key, config.per_page))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        auth: &SourceCredential,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, MapperError> {
        let mut request = self
            .client
            .get(join_url(&self.endpoint, path))
            .header(AUTHORIZATION, auth.as_header_value())
            .header(ACCEPT, "application/json");
        if let Some(key) = &self.api_key {
            request = request.header("Api-Key", key);
        }
        if !query.is_empty() {
            request = request.query(query);
        }

        debug!(path, "GET Netilion");
        let response = check_status(request.send().await?, &format!("GET {}", path)).await?;
        Ok(response.json::<T>().await?)
    }

    async fn list<T: DeserializeOwned>(
        &self,
        auth: &SourceCredential,
        path: &str,
        key: &str,
        page: u32,
    ) -> Result<ListPage<T>, MapperError> {
        let mut body: Value = self
            .get_json(
                auth,
                path,
                &[("page", page.to_string()), ("per_page", self.per_page.to_string())],
            )
            .await?;

        let items = match body.get_mut(key).map(Value::take) {
            Some(Value::Null) | None => Vec::new(),
            Some(items) => serde_json::from_value(items)?,
        };
        let pagination: Pagination = match body.get_mut("pagination").map(Value::take) {
            Some(Value::Null) | None => Pagination::default(),
            Some(pagination) => serde_json::from_value(pagination)?,
        };

        Ok(ListPage { items, pagination })
    }
}

#[async_trait]
impl NetilionSource for NetilionClient {
    async fn list_assets(&self, auth: &SourceCredential, page: u32) -> Result<ListPage<NetilionAsset>, MapperError> {
        self.list(auth, "/assets", "assets", page).await
    }

    async fn get_asset(&self, auth: &SourceCredential, asset_id: u64) -> Result<NetilionAsset, MapperError> {
        self.get_json(auth, &format!("/assets/{}", asset_id), &[]).await
    }

    async fn get_product(&self, auth: &SourceCredential, product_id: u64) -> Result<NetilionProduct, MapperError> {
        self.get_json(auth, &format!("/products/{}", product_id), &[]).await
    }

    async fn get_manufacturer(
        &self,
        auth: &SourceCredential,
        manufacturer_id: u64,
    ) -> Result<NetilionManufacturer, MapperError> {
        self.get_json(auth, &format!("/companies/{}", manufacturer_id), &[]).await
    }

    async fn list_asset_softwares(
        &self,
        auth: &SourceCredential,
        asset_id: u64,
        page: u32,
    ) -> Result<ListPage<NetilionSoftware>, MapperError> {
        self.list(auth, &format!("/assets/{}/softwares", asset_id), "softwares", page)
            .await
    }

    async fn list_product_categories(
        &self,
        auth: &SourceCredential,
        product_id: u64,
        page: u32,
    ) -> Result<ListPage<NetilionCategory>, MapperError> {
        self.list(auth, &format!("/products/{}/categories", product_id), "categories", page)
            .await
    }

    async fn list_asset_documents(
        &self,
        auth: &SourceCredential,
        asset_id: u64,
        page: u32,
    ) -> Result<ListPage<NetilionDocument>, MapperError> {
        self.list(auth, &format!("/assets/{}/documents", asset_id), "documents", page)
            .await
    }

    async fn get_asset_specifications(
        &self,
        auth: &SourceCredential,
        asset_id: u64,
    ) -> Result<NetilionSpecification, MapperError> {
        self.get_json(auth, &format!("/assets/{}/specifications", asset_id), &[])
            .await
    }
}
