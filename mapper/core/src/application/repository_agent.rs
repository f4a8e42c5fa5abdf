// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Repository Agent
//!
//! Writes shells and submodels into the AAS repository and reads them back.
//!
//! # Upsert
//!
//! `submit_*` posts first. A 409 means the id already exists and is answered
//! with an update of the same object; any other failure is returned as is.
//! Post answers keep the repository status (usually 201), successful updates
//! answer 200. The payload is always the submitted object.

use futures::future::join_all;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::application::pagination::collect_cursor_pages;
use crate::domain::aas::{AssetAdministrationShell, Identifiable, Submodel};
use crate::domain::agent_result::{AgentOpResult, BatchOutcome};
use crate::domain::error::MapperError;
use crate::domain::repository::AasRepository;

/// Ids produced by the dummy generator (and anything else rooted on loopback)
pub const LOOPBACK_ID_PATTERN: &str = r"^https?://(localhost|127\.0\.0\.1)(:\d+)?/";

/// What a flush removed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlushReport {
    pub deleted_shells: Vec<String>,
    pub deleted_submodels: Vec<String>,
}

pub struct RepositoryAgent {
    repository: Arc<dyn AasRepository>,
}

impl RepositoryAgent {
    pub fn new(repository: Arc<dyn AasRepository>) -> Self {
        Self { repository }
    }

    pub async fn submit_aas(&self, shell: &AssetAdministrationShell) -> AgentOpResult {
        let id = shell.id();
        match self.repository.post_shell(shell).await {
            Ok(status) => {
                info!(shell_id = id, status, "Posted shell");
                AgentOpResult::ok(status, shell)
            }
            Err(e) if e.is_conflict() => {
                info!(shell_id = id, "Shell exists, updating");
                match self.repository.update_shell(shell).await {
                    Ok(_) => AgentOpResult::ok(200, shell),
                    Err(e) => {
                        error!(shell_id = id, status = e.http_status, "Shell update failed: {}", e);
                        AgentOpResult::from_error(&e.context(format!("Failed to update shell {} in repository", id)))
                    }
                }
            }
            Err(e) => {
                error!(shell_id = id, status = e.http_status, "Shell post failed: {}", e);
                AgentOpResult::from_error(&e.context(format!("Failed to post shell {} to repository", id)))
            }
        }
    }

    pub async fn submit_submodel_of_aas(&self, shell_id: &str, submodel: &Submodel) -> AgentOpResult {
        let id = submodel.id();
        match self.repository.post_submodel(shell_id, submodel).await {
            Ok(status) => {
                info!(shell_id, submodel_id = id, status, "Posted submodel");
                AgentOpResult::ok(status, submodel)
            }
            Err(e) if e.is_conflict() => {
                info!(shell_id, submodel_id = id, "Submodel exists, updating");
                match self.repository.update_submodel(shell_id, submodel).await {
                    Ok(_) => AgentOpResult::ok(200, submodel),
                    Err(e) => {
                        error!(shell_id, submodel_id = id, status = e.http_status, "Submodel update failed: {}", e);
                        AgentOpResult::from_error(
                            &e.context(format!("Failed to update submodel {} of shell {} in repository", id, shell_id)),
                        )
                    }
                }
            }
            Err(e) => {
                error!(shell_id, submodel_id = id, status = e.http_status, "Submodel post failed: {}", e);
                AgentOpResult::from_error(
                    &e.context(format!("Failed to post submodel {} of shell {} to repository", id, shell_id)),
                )
            }
        }
    }

    /// Run `submit` over every item concurrently and aggregate in input order.
    /// Items are labelled by their id in the failure list.
    pub async fn multi_submit<'a, T, F, Fut>(&self, label: &str, items: &'a [T], submit: F) -> BatchOutcome<Value>
    where
        T: Identifiable,
        F: Fn(&'a T) -> Fut,
        Fut: Future<Output = AgentOpResult>,
    {
        let results = join_all(items.iter().map(submit)).await;
        let outcome = BatchOutcome::from_op_results(
            items.iter().map(|item| item.identifier().to_string()).zip(results),
        );
        info!(
            label,
            total = items.len(),
            failed = outcome.failed.len(),
            status = outcome.status,
            "Batch submission finished"
        );
        outcome
    }

    pub async fn submit_all_aas(&self, shells: &[AssetAdministrationShell]) -> AgentOpResult {
        self.multi_submit("shell", shells, |shell| self.submit_aas(shell))
            .await
            .into_op_result("shell")
    }

    pub async fn submit_all_submodels(&self, shell_id: &str, submodels: &[Submodel]) -> AgentOpResult {
        self.multi_submit("submodel", submodels, |submodel| self.submit_submodel_of_aas(shell_id, submodel))
            .await
            .into_op_result("submodel")
    }

    pub async fn get_all_aas(&self) -> Result<Vec<AssetAdministrationShell>, MapperError> {
        collect_cursor_pages("list shells", |cursor| self.repository.get_all_shells(cursor))
            .await
            .map_err(|e| e.context("Failed to get all shells from repository"))
    }

    pub async fn get_aas(&self, shell_id: &str) -> Result<AssetAdministrationShell, MapperError> {
        self.repository
            .get_shell(shell_id)
            .await
            .map_err(|e| e.context(format!("Failed to get shell {} from repository", shell_id)))
    }

    pub async fn get_submodel(&self, shell_id: &str, submodel_id: &str) -> Result<Submodel, MapperError> {
        self.repository.get_submodel(shell_id, submodel_id).await.map_err(|e| {
            e.context(format!(
                "Failed to get submodel {} of shell {} from repository",
                submodel_id, shell_id
            ))
        })
    }

    /// Every submodel referenced by any shell. Submodels that cannot be
    /// fetched are logged and skipped; only the shell listing can fail.
    pub async fn get_all_submodels(&self) -> Result<Vec<Submodel>, MapperError> {
        let shells = self.get_all_aas().await?;
        let pairs: Vec<(String, String)> = shells
            .iter()
            .flat_map(|shell| {
                shell
                    .submodel_ids()
                    .into_iter()
                    .map(move |submodel_id| (shell.id().to_string(), submodel_id))
            })
            .collect();

        let results = join_all(
            pairs
                .iter()
                .map(|(shell_id, submodel_id)| self.get_submodel(shell_id, submodel_id)),
        )
        .await;

        Ok(results
            .into_iter()
            .filter_map(|result| match result {
                Ok(submodel) => Some(submodel),
                Err(e) => {
                    warn!(status = e.http_status, "Skipping submodel: {}", e);
                    None
                }
            })
            .collect())
    }

    pub async fn delete_aas(&self, shell_id: &str) -> Result<u16, MapperError> {
        self.repository
            .delete_shell(shell_id)
            .await
            .map_err(|e| e.context(format!("Failed to delete shell {} from repository", shell_id)))
    }

    pub async fn delete_submodel(&self, shell_id: &str, submodel_id: &str) -> Result<u16, MapperError> {
        self.repository.delete_submodel(shell_id, submodel_id).await.map_err(|e| {
            e.context(format!(
                "Failed to delete submodel {} of shell {} from repository",
                submodel_id, shell_id
            ))
        })
    }

    /// Delete every loopback-rooted submodel, whichever shell references it,
    /// then every loopback-rooted shell. Other ids are left alone, also when a
    /// loopback shell references them. Stops at the first failed deletion.
    pub async fn flush(&self) -> Result<FlushReport, MapperError> {
        let pattern = Regex::new(LOOPBACK_ID_PATTERN)
            .map_err(|e| MapperError::configuration(format!("Invalid flush pattern: {}", e)))?;
        let shells = self.get_all_aas().await.map_err(|e| e.context("Flush aborted"))?;

        let mut report = FlushReport::default();
        for shell in &shells {
            for submodel_id in shell.submodel_ids() {
                if !pattern.is_match(&submodel_id) {
                    continue;
                }
                self.delete_submodel(shell.id(), &submodel_id)
                    .await
                    .map_err(|e| e.context("Flush aborted"))?;
                report.deleted_submodels.push(submodel_id);
            }
            if pattern.is_match(shell.id()) {
                self.delete_aas(shell.id()).await.map_err(|e| e.context("Flush aborted"))?;
                report.deleted_shells.push(shell.id().to_string());
            }
        }

        info!(
            shells = report.deleted_shells.len(),
            submodels = report.deleted_submodels.len(),
            "Flushed loopback shells"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loopback_pattern() {
        let pattern = Regex::new(LOOPBACK_ID_PATTERN).unwrap();

        assert!(pattern.is_match("http://localhost:8080/dummy/mapper/shells/1"));
        assert!(pattern.is_match("https://127.0.0.1/x"));
        assert!(pattern.is_match("http://localhost/x"));
        assert!(!pattern.is_match("https://mapper.example.com/mapper/shells/1"));
        assert!(!pattern.is_match("http://localhost.example.com/x"));
        assert!(!pattern.is_match("urn:localhost:1"));
    }
}
