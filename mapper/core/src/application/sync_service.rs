// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Sync Service
//!
//! Composes [`SourceAgent`] and [`RepositoryAgent`]: build shells and submodels
//! from Netilion, then upsert them into the repository.
//!
//! A bundle is one shell plus its submodels. The shell is submitted first;
//! submodels are only submitted when the shell went through, since the
//! repository attaches them to it. The result of a bundle is the multi-status
//! over the shell and all its submodels.

use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::application::repository_agent::RepositoryAgent;
use crate::application::source_agent::SourceAgent;
use crate::domain::aas::{AssetAdministrationShell, Submodel};
use crate::domain::agent_result::{AgentOpResult, BatchOutcome};
use crate::domain::identifiers::shell_id_short_to_asset_id;
use crate::domain::source::SourceCredential;

pub struct SyncService {
    source: Arc<SourceAgent>,
    repository: Arc<RepositoryAgent>,
}

impl SyncService {
    pub fn new(source: Arc<SourceAgent>, repository: Arc<RepositoryAgent>) -> Self {
        Self { source, repository }
    }

    pub async fn submit_bundle(&self, shell: &AssetAdministrationShell, submodels: &[Submodel]) -> AgentOpResult {
        let shell_result = self.repository.submit_aas(shell).await;
        if !shell_result.is_success() {
            return shell_result;
        }

        let submodel_outcome = self
            .repository
            .multi_submit("submodel", submodels, |submodel| {
                self.repository.submit_submodel_of_aas(shell.id(), submodel)
            })
            .await;

        let mut successful = vec![shell_result.json];
        successful.extend(submodel_outcome.successful);
        BatchOutcome::new(successful, submodel_outcome.failed).into_op_result("submission")
    }

    pub async fn sync_asset(&self, auth: &SourceCredential, asset_id: u64) -> AgentOpResult {
        let asset = match self.source.get_asset(auth, asset_id).await {
            Ok(asset) => asset,
            Err(e) => return AgentOpResult::from_error(&e),
        };

        match self.source.asset_to_aas_with_submodels(auth, &asset).await {
            Ok((shell, submodels)) => {
                info!(asset_id, submodels = submodels.len(), "Syncing asset");
                self.submit_bundle(&shell, &submodels).await
            }
            Err(e) => AgentOpResult::from_error(&e.context(format!("Failed to sync asset {}", asset_id))),
        }
    }

    async fn sync_assets(&self, auth: &SourceCredential, asset_ids: &[u64]) -> AgentOpResult {
        let results = join_all(asset_ids.iter().map(|id| self.sync_asset(auth, *id))).await;
        BatchOutcome::<Value>::from_op_results(asset_ids.iter().map(|id| id.to_string()).zip(results))
            .into_op_result("asset sync")
    }

    pub async fn sync_all(&self, auth: &SourceCredential) -> AgentOpResult {
        let assets = match self.source.get_all_assets(auth).await {
            Ok(assets) => assets,
            Err(e) => return AgentOpResult::from_error(&e),
        };
        let ids: Vec<u64> = assets.iter().map(|asset| asset.id).collect();
        info!(assets = ids.len(), "Syncing all assets");
        self.sync_assets(auth, &ids).await
    }

    /// Re-sync the asset behind a previously synced shell
    pub async fn refresh_aas(&self, auth: &SourceCredential, id_short: &str) -> AgentOpResult {
        match shell_id_short_to_asset_id(id_short) {
            Ok(asset_id) => self.sync_asset(auth, asset_id).await,
            Err(e) => AgentOpResult::from_error(&e),
        }
    }

    /// Re-sync every repository shell whose idShort names a Netilion asset
    pub async fn refresh_all(&self, auth: &SourceCredential) -> AgentOpResult {
        let shells = match self.repository.get_all_aas().await {
            Ok(shells) => shells,
            Err(e) => return AgentOpResult::from_error(&e),
        };

        let ids: Vec<u64> = shells
            .iter()
            .filter_map(|shell| {
                let id_short = shell.id_short()?;
                match shell_id_short_to_asset_id(id_short) {
                    Ok(id) => Some(id),
                    Err(_) => {
                        warn!(shell_id = shell.id(), id_short, "Skipping shell not produced by the mapper");
                        None
                    }
                }
            })
            .collect();

        info!(shells = shells.len(), refreshable = ids.len(), "Refreshing shells");
        self.sync_assets(auth, &ids).await
    }

    /// Generate dummy bundles and push them
    pub async fn push_dummies(&self, count: usize, base_url: &str) -> AgentOpResult {
        let bundles = match crate::application::dummy_generator::generate(count, base_url) {
            Ok(bundles) => bundles,
            Err(e) => return AgentOpResult::from_error(&e),
        };

        let results = join_all(
            bundles
                .iter()
                .map(|(shell, submodels)| self.submit_bundle(shell, submodels)),
        )
        .await;
        BatchOutcome::<Value>::from_op_results(
            bundles.iter().map(|(shell, _)| shell.id().to_string()).zip(results),
        )
        .into_op_result("dummy")
    }
}
