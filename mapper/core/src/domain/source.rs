// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Netilion Source Interface
//!
//! Anti-corruption boundary towards the Netilion API. The application layer
//! only sees these operations; the HTTP adapter lives in
//! `crate::infrastructure::netilion_client`.
//!
//! Every call takes the caller's credential and fails with a
//! [`MapperError`] carrying the remote status and body on non-2xx.

use async_trait::async_trait;
use std::fmt;

use crate::domain::error::MapperError;
use crate::domain::netilion::{
    ListPage, NetilionAsset, NetilionCategory, NetilionDocument, NetilionManufacturer,
    NetilionProduct, NetilionSoftware, NetilionSpecification,
};

/// Opaque credential of the requesting user, forwarded verbatim as the
/// `Authorization` header value
#[derive(Clone, PartialEq, Eq)]
pub struct SourceCredential(String);

impl SourceCredential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_header_value(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SourceCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SourceCredential(***)")
    }
}

#[async_trait]
pub trait NetilionSource: Send + Sync {
    async fn list_assets(&self, auth: &SourceCredential, page: u32) -> Result<ListPage<NetilionAsset>, MapperError>;

    async fn get_asset(&self, auth: &SourceCredential, asset_id: u64) -> Result<NetilionAsset, MapperError>;

    async fn get_product(&self, auth: &SourceCredential, product_id: u64) -> Result<NetilionProduct, MapperError>;

    async fn get_manufacturer(&self, auth: &SourceCredential, manufacturer_id: u64) -> Result<NetilionManufacturer, MapperError>;

    async fn list_asset_softwares(
        &self,
        auth: &SourceCredential,
        asset_id: u64,
        page: u32,
    ) -> Result<ListPage<NetilionSoftware>, MapperError>;

    async fn list_product_categories(
        &self,
        auth: &SourceCredential,
        product_id: u64,
        page: u32,
    ) -> Result<ListPage<NetilionCategory>, MapperError>;

    async fn list_asset_documents(
        &self,
        auth: &SourceCredential,
        asset_id: u64,
        page: u32,
    ) -> Result<ListPage<NetilionDocument>, MapperError>;

    async fn get_asset_specifications(
        &self,
        auth: &SourceCredential,
        asset_id: u64,
    ) -> Result<NetilionSpecification, MapperError>;
}
