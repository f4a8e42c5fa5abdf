// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # AAS Repository Interface
//!
//! Contract of the target repository the mapper pushes into. Ids are passed
//! in plain form; adapters are responsible for base64url-encoding them into
//! path segments.
//!
//! | Operation | Conflict signal |
//! |-----------|-----------------|
//! | `post_shell` / `post_submodel` | 409 when the id already exists |
//! | `update_shell` / `update_submodel` | none, replaces the stored object |
//!
//! Non-2xx answers surface as [`MapperError`] with `kind = Remote` and the
//! remote status, so `err.is_conflict()` identifies the upsert fallback case.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::aas::{AssetAdministrationShell, Submodel};
use crate::domain::error::MapperError;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PagingMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// One cursor page of `GET /shells`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellPage {
    #[serde(default)]
    pub result: Vec<AssetAdministrationShell>,
    #[serde(default)]
    pub paging_metadata: PagingMetadata,
}

#[async_trait]
pub trait AasRepository: Send + Sync {
    async fn post_shell(&self, shell: &AssetAdministrationShell) -> Result<u16, MapperError>;

    async fn update_shell(&self, shell: &AssetAdministrationShell) -> Result<u16, MapperError>;

    async fn get_all_shells(&self, cursor: Option<String>) -> Result<ShellPage, MapperError>;

    async fn get_shell(&self, shell_id: &str) -> Result<AssetAdministrationShell, MapperError>;

    async fn delete_shell(&self, shell_id: &str) -> Result<u16, MapperError>;

    async fn post_submodel(&self, shell_id: &str, submodel: &Submodel) -> Result<u16, MapperError>;

    async fn update_submodel(&self, shell_id: &str, submodel: &Submodel) -> Result<u16, MapperError>;

    async fn get_submodel(&self, shell_id: &str, submodel_id: &str) -> Result<Submodel, MapperError>;

    async fn delete_submodel(&self, shell_id: &str, submodel_id: &str) -> Result<u16, MapperError>;
}
