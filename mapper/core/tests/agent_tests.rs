// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Source agent, repository agent and sync service against in-memory fakes.
//!
//! Covers the upsert protocol, batch aggregation (partial and total failure on
//! both the source and the repository side), partial shell degradation and the
//! loopback flush.

mod common;

use aas_mapper_core::application::mapping::shell_for_asset;
use aas_mapper_core::application::repository_agent::RepositoryAgent;
use aas_mapper_core::application::source_agent::SourceAgent;
use aas_mapper_core::application::sync_service::SyncService;
use aas_mapper_core::domain::aas::AssetAdministrationShell;
use aas_mapper_core::domain::identifiers::{shell_id, submodel_id, SubmodelName};
use common::{asset, credential, FakeRepository, FakeSource, ROOT};
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn shell(id: u64) -> AssetAdministrationShell {
    shell_for_asset(ROOT, &asset(id), &[SubmodelName::Nameplate])
}

fn services(source: FakeSource) -> (Arc<SourceAgent>, Arc<RepositoryAgent>, Arc<FakeRepository>, SyncService) {
    let repository = Arc::new(FakeRepository::default());
    let source_agent = Arc::new(SourceAgent::new(Arc::new(source), ROOT));
    let repository_agent = Arc::new(RepositoryAgent::new(repository.clone()));
    let sync = SyncService::new(source_agent.clone(), repository_agent.clone());
    (source_agent, repository_agent, repository, sync)
}

#[tokio::test]
async fn test_submit_aas_posts_then_updates_on_conflict() {
    let repository = Arc::new(FakeRepository::default());
    let agent = RepositoryAgent::new(repository.clone());
    let shell = shell(1);
    let expected = serde_json::to_value(&shell).unwrap();

    let first = agent.submit_aas(&shell).await;
    let second = agent.submit_aas(&shell).await;

    assert_eq!(first.status, 201);
    assert_eq!(first.json, expected);
    assert_eq!(second.status, 200);
    assert_eq!(second.json, expected);
    assert_eq!(repository.posts.load(Ordering::SeqCst), 2);
    assert_eq!(repository.updates.load(Ordering::SeqCst), 1);
    assert_eq!(repository.shells.lock().len(), 1);
}

#[tokio::test]
async fn test_submit_failure_other_than_conflict_is_returned() {
    let repository = Arc::new(FakeRepository::default());
    repository.fail_on(shell_id(ROOT, 1));
    let agent = RepositoryAgent::new(repository.clone());

    let result = agent.submit_aas(&shell(1)).await;

    assert_eq!(result.status, 500);
    assert!(result.message().unwrap().starts_with("Failed to post shell"));
    assert_eq!(result.json["error"], serde_json::json!({"messages": ["boom"]}));
    assert_eq!(repository.updates.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_multi_submit_partial_failure_is_207() {
    let repository = Arc::new(FakeRepository::default());
    repository.fail_on(shell_id(ROOT, 1));
    repository.fail_on(shell_id(ROOT, 3));
    let agent = RepositoryAgent::new(repository.clone());
    let shells: Vec<AssetAdministrationShell> = (1..=5).map(shell).collect();

    let result = agent.submit_all_aas(&shells).await;

    assert_eq!(result.status, 207);
    let successful: Vec<&str> = result.json["successful"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(successful, vec![shell_id(ROOT, 2), shell_id(ROOT, 4), shell_id(ROOT, 5)]);

    let failed = result.json["failed"].as_array().unwrap();
    assert_eq!(failed.len(), 2);
    assert_eq!(failed[0]["item"], shell_id(ROOT, 1));
    assert_eq!(failed[1]["item"], shell_id(ROOT, 3));
}

#[tokio::test]
async fn test_multi_submit_all_failed_is_500() {
    let repository = Arc::new(FakeRepository::default());
    for id in 1..=3 {
        repository.fail_on(shell_id(ROOT, id));
    }
    let agent = RepositoryAgent::new(repository);
    let shells: Vec<AssetAdministrationShell> = (1..=3).map(shell).collect();

    let result = agent.submit_all_aas(&shells).await;

    assert_eq!(result.status, 500);
    assert_eq!(result.message(), Some("All 3 shell operations failed"));
    assert_eq!(result.json["error"]["failed"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_source_batch_all_failed_is_500() {
    // No asset has a measuring range, so every ConfigurationAsBuilt build fails
    let (source, _, _, _) = services(FakeSource::with_assets(&[1, 2, 3]));

    let outcome = source
        .get_submodel_for_all_assets(&credential(), SubmodelName::ConfigurationAsBuilt)
        .await
        .unwrap();

    assert_eq!(outcome.status, 500);
    assert!(outcome.successful.is_empty());
    assert!(outcome.failed.iter().all(|f| f.status == 404));
    let result = outcome.into_op_result("submodel");
    assert_eq!(result.status, 500);
}

#[tokio::test]
async fn test_source_batch_mixed_keeps_asset_order() {
    let fake = FakeSource::with_assets(&[1, 2, 3, 4]).failing(2);
    let (source, _, _, _) = services(fake);

    let outcome = source
        .get_submodel_for_all_assets(&credential(), SubmodelName::Nameplate)
        .await
        .unwrap();

    assert_eq!(outcome.status, 207);
    let ids: Vec<&str> = outcome.successful.iter().map(|s| s.id()).collect();
    assert_eq!(
        ids,
        vec![
            submodel_id(ROOT, 1, SubmodelName::Nameplate),
            submodel_id(ROOT, 3, SubmodelName::Nameplate),
            submodel_id(ROOT, 4, SubmodelName::Nameplate),
        ]
    );
    assert_eq!(outcome.failed[0].item, "2");
    assert_eq!(outcome.failed[0].status, 503);
    assert!(outcome.failed[0]
        .message
        .starts_with("Failed to get Nameplate submodel for asset 2 from source"));
}

#[tokio::test]
async fn test_all_assets_are_paged_in_order() {
    let (source, _, _, _) = services(FakeSource::with_assets(&[5, 4, 3, 2, 1]));

    let assets = source.get_all_assets(&credential()).await.unwrap();

    let ids: Vec<u64> = assets.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![5, 4, 3, 2, 1]);
}

#[tokio::test]
async fn test_asset_to_aas_degrades_without_measuring_range() {
    let fake = FakeSource::with_assets(&[1, 2]).with_measuring_range(2);
    let (source, _, _, _) = services(fake);

    let plain = source.get_aas_for_asset(&credential(), 1).await.unwrap();
    let full = source.get_aas_for_asset(&credential(), 2).await.unwrap();

    assert_eq!(plain.submodel_ids(), vec![submodel_id(ROOT, 1, SubmodelName::Nameplate)]);
    assert_eq!(full.submodel_ids().len(), 3);
    assert_eq!(
        source.asset_submodel_names(&credential(), 1).await.unwrap(),
        vec![SubmodelName::Nameplate]
    );
}

#[tokio::test]
async fn test_missing_measuring_range_never_reaches_repository() {
    let (source, _, repository, sync) = services(FakeSource::with_assets(&[1]));

    let err = source
        .get_submodel_for_asset(&credential(), 1, SubmodelName::ConfigurationAsBuilt)
        .await
        .unwrap_err();
    assert_eq!(err.http_status, 404);
    assert_eq!(repository.call_count(), 0);

    let result = sync.sync_asset(&credential(), 1).await;
    assert_eq!(result.status, 200);
    let stored: Vec<String> = repository.submodels.lock().keys().map(|(_, sm)| sm.clone()).collect();
    assert_eq!(stored, vec![submodel_id(ROOT, 1, SubmodelName::Nameplate)]);
}

#[tokio::test]
async fn test_sync_asset_submits_shell_and_submodels() {
    let (_, _, repository, sync) = services(FakeSource::with_assets(&[7]).with_measuring_range(7));

    let first = sync.sync_asset(&credential(), 7).await;
    let second = sync.sync_asset(&credential(), 7).await;

    assert_eq!(first.status, 200);
    assert_eq!(first.json["successful"].as_array().unwrap().len(), 4);
    assert_eq!(second.status, 200);
    assert_eq!(repository.submodels.lock().len(), 3);
    assert_eq!(repository.updates.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_sync_unknown_asset_keeps_remote_status() {
    let (_, _, repository, sync) = services(FakeSource::with_assets(&[1]));

    let result = sync.sync_asset(&credential(), 99).await;

    assert_eq!(result.status, 404);
    assert_eq!(result.json["error"], serde_json::json!({"errors": ["not found"]}));
    assert_eq!(repository.call_count(), 0);
}

#[tokio::test]
async fn test_refresh_all_only_touches_mapper_shells() {
    let (_, _, repository, sync) = services(FakeSource::with_assets(&[1, 2]));
    repository.insert_shell(shell(1));
    let mut foreign = shell(2);
    foreign.identity.id = "urn:other:shell".to_string();
    foreign.identity.id_short = Some("SomethingElse".to_string());
    repository.insert_shell(foreign);

    let result = sync.refresh_all(&credential()).await;

    assert_eq!(result.status, 200);
    assert_eq!(result.json["successful"].as_array().unwrap().len(), 1);
    assert!(repository.shells.lock().contains_key("urn:other:shell"));
}

#[tokio::test]
async fn test_refresh_rejects_foreign_id_short() {
    let (_, _, _, sync) = services(FakeSource::with_assets(&[1]));

    assert_eq!(sync.refresh_aas(&credential(), "NetilionAAS_x").await.status, 400);
    assert_eq!(sync.refresh_aas(&credential(), "NetilionAAS_1").await.status, 200);
}

#[tokio::test]
async fn test_get_all_submodels_skips_unreadable() {
    let (_, repository_agent, repository, sync) = services(FakeSource::with_assets(&[1, 2, 3]));
    sync.sync_all(&credential()).await;
    // Dangling reference: the shell points at a submodel that is gone
    repository
        .submodels
        .lock()
        .remove(&(shell_id(ROOT, 2), submodel_id(ROOT, 2, SubmodelName::Nameplate)));

    let shells = repository_agent.get_all_aas().await.unwrap();
    let submodels = repository_agent.get_all_submodels().await.unwrap();

    assert_eq!(shells.len(), 3);
    assert_eq!(submodels.len(), 2);
}

#[tokio::test]
async fn test_flush_removes_only_loopback_shells() {
    let (_, repository_agent, repository, sync) = services(FakeSource::with_assets(&[1]));
    sync.sync_asset(&credential(), 1).await;
    let pushed = sync.push_dummies(3, "http://localhost:8080").await;
    assert_eq!(pushed.status, 200);
    assert_eq!(repository.shells.lock().len(), 4);

    let report = repository_agent.flush().await.unwrap();

    assert_eq!(report.deleted_shells.len(), 3);
    assert_eq!(report.deleted_submodels.len(), 3);
    let remaining: Vec<String> = repository.shells.lock().keys().cloned().collect();
    assert_eq!(remaining, vec![shell_id(ROOT, 1)]);
}

#[tokio::test]
async fn test_flush_selects_submodels_by_their_own_id() {
    let (_, repository_agent, repository, sync) = services(FakeSource::with_assets(&[1]));
    sync.sync_asset(&credential(), 1).await;
    sync.push_dummies(1, "http://localhost:8080").await;

    let real_shell = shell_id(ROOT, 1);
    let dummy_shell = shell_id("http://localhost:8080/dummy", 900_001);
    let real_submodel = submodel_id(ROOT, 1, SubmodelName::Nameplate);
    let dummy_submodel = submodel_id("http://localhost:8080/dummy", 900_001, SubmodelName::Nameplate);

    // Cross-reference: each shell also points at the other one's nameplate
    {
        let mut shells = repository.shells.lock();
        let real_refs = shells[&real_shell].submodels.clone();
        let dummy_refs = shells[&dummy_shell].submodels.clone();
        shells.get_mut(&real_shell).unwrap().submodels.extend(dummy_refs);
        shells.get_mut(&dummy_shell).unwrap().submodels.extend(real_refs);

        let mut submodels = repository.submodels.lock();
        let dummy_nameplate = submodels[&(dummy_shell.clone(), dummy_submodel.clone())].clone();
        submodels.insert((real_shell.clone(), dummy_submodel.clone()), dummy_nameplate);
    }

    let report = repository_agent.flush().await.unwrap();

    assert_eq!(report.deleted_shells, vec![dummy_shell]);
    assert_eq!(report.deleted_submodels, vec![dummy_submodel.clone(), dummy_submodel]);
    let remaining: Vec<(String, String)> = repository.submodels.lock().keys().cloned().collect();
    assert_eq!(remaining, vec![(real_shell, real_submodel)]);
}

#[tokio::test]
async fn test_get_asset_failure_keeps_status_and_context() {
    let (source, _, _, _) = services(FakeSource::with_assets(&[1, 2]).failing(2));

    let err = source.get_asset(&credential(), 2).await.unwrap_err();

    assert_eq!(err.http_status, 503);
    assert!(err.message.starts_with("Failed to get asset 2 from source"));
    assert_eq!(err.remote_body, Some(serde_json::json!({"error": "unavailable"})));
}

#[tokio::test]
async fn test_flush_aborts_on_first_failed_delete() {
    let (_, repository_agent, repository, sync) = services(FakeSource::with_assets(&[]));
    sync.push_dummies(2, "http://127.0.0.1:9000").await;
    let first_submodel = repository.submodels.lock().keys().next().map(|(_, sm)| sm.clone()).unwrap();
    repository.fail_on(first_submodel);

    let err = repository_agent.flush().await.unwrap_err();

    assert_eq!(err.http_status, 500);
    assert!(err.message.starts_with("Flush aborted"));
    assert_eq!(repository.shells.lock().len(), 2);
}
