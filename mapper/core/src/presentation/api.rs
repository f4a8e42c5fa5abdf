// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! HTTP surface
//!
//! Thin controllers: extract parameters, call one agent operation, answer with
//! the `{status, json}` envelope it produced. Netilion-backed routes need the
//! caller's `Authorization` header, which is forwarded unchanged.

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderMap, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::application::repository_agent::RepositoryAgent;
use crate::application::source_agent::SourceAgent;
use crate::application::sync_service::SyncService;
use crate::domain::agent_result::AgentOpResult;
use crate::domain::error::MapperError;
use crate::domain::identifiers::{decode_for_log, decode_id, SubmodelName};
use crate::domain::source::SourceCredential;

pub struct AppState {
    pub source: Arc<SourceAgent>,
    pub repository: Arc<RepositoryAgent>,
    pub sync: Arc<SyncService>,
    /// Loopback base URL dummy shells are rooted on
    pub dummy_base_url: String,
}

impl AppState {
    pub fn new(source: Arc<SourceAgent>, repository: Arc<RepositoryAgent>, dummy_base_url: impl Into<String>) -> Self {
        let sync = Arc::new(SyncService::new(source.clone(), repository.clone()));
        Self {
            source,
            repository,
            sync,
            dummy_base_url: dummy_base_url.into(),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/netilion/assets", get(list_assets_handler))
        .route("/netilion/shells", get(list_shells_handler))
        .route("/netilion/shells/{asset_id}", get(get_shell_handler))
        .route("/netilion/shells/{asset_id}/submodel-names", get(submodel_names_handler))
        .route("/netilion/shells/{asset_id}/submodels/{name}", get(get_submodel_handler))
        .route("/netilion/submodels/{name}", get(submodel_for_all_handler))
        .route("/sync/shells", post(sync_all_handler))
        .route("/sync/shells/{asset_id}", post(sync_asset_handler))
        .route("/sync/refresh", post(refresh_all_handler))
        .route("/sync/refresh/{id_short}", post(refresh_handler))
        .route("/repository/shells", get(repository_shells_handler))
        .route("/repository/submodels", get(repository_submodels_handler))
        .route("/repository/shells/{id}", delete(delete_shell_handler))
        .route("/repository/dummy", post(dummy_handler))
        .route("/repository/flush", delete(flush_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

type Reply = (StatusCode, Json<Value>);

fn reply(result: AgentOpResult) -> Reply {
    let status = StatusCode::from_u16(result.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(result.json))
}

fn error_reply(err: &MapperError) -> Reply {
    reply(AgentOpResult::from_error(err))
}

/// Unwrap a path extraction, answering malformed segments with a JSON 400
fn path_param<T>(param: Result<Path<T>, PathRejection>) -> Result<T, Reply> {
    param
        .map(|Path(value)| value)
        .map_err(|rejection| error_reply(&MapperError::invalid_input(rejection.body_text())))
}

fn query_params<T>(params: Result<Query<T>, QueryRejection>) -> Result<T, Reply> {
    params
        .map(|Query(value)| value)
        .map_err(|rejection| error_reply(&MapperError::invalid_input(rejection.body_text())))
}

fn credential(headers: &HeaderMap) -> Result<SourceCredential, Reply> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .map(SourceCredential::new)
        .ok_or_else(|| error_reply(&MapperError::unauthorized("Missing Authorization header")))
}

async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn list_assets_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Reply {
    let auth = match credential(&headers) {
        Ok(auth) => auth,
        Err(reply) => return reply,
    };
    reply(AgentOpResult::from_result(200, state.source.get_all_assets(&auth).await))
}

async fn list_shells_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Reply {
    let auth = match credential(&headers) {
        Ok(auth) => auth,
        Err(reply) => return reply,
    };
    match state.source.get_aas_for_all_assets(&auth).await {
        Ok(outcome) => reply(outcome.into_op_result("shell")),
        Err(e) => error_reply(&e),
    }
}

async fn get_shell_handler(
    State(state): State<Arc<AppState>>,
    asset_id: Result<Path<u64>, PathRejection>,
    headers: HeaderMap,
) -> Reply {
    let auth = match credential(&headers) {
        Ok(auth) => auth,
        Err(reply) => return reply,
    };
    let asset_id = match path_param(asset_id) {
        Ok(asset_id) => asset_id,
        Err(reply) => return reply,
    };
    reply(AgentOpResult::from_result(200, state.source.get_aas_for_asset(&auth, asset_id).await))
}

async fn submodel_names_handler(
    State(state): State<Arc<AppState>>,
    asset_id: Result<Path<u64>, PathRejection>,
    headers: HeaderMap,
) -> Reply {
    let auth = match credential(&headers) {
        Ok(auth) => auth,
        Err(reply) => return reply,
    };
    let asset_id = match path_param(asset_id) {
        Ok(asset_id) => asset_id,
        Err(reply) => return reply,
    };
    reply(AgentOpResult::from_result(200, state.source.asset_submodel_names(&auth, asset_id).await))
}

async fn get_submodel_handler(
    State(state): State<Arc<AppState>>,
    params: Result<Path<(u64, String)>, PathRejection>,
    headers: HeaderMap,
) -> Reply {
    let auth = match credential(&headers) {
        Ok(auth) => auth,
        Err(reply) => return reply,
    };
    let (asset_id, name) = match path_param(params) {
        Ok(params) => params,
        Err(reply) => return reply,
    };
    let name: SubmodelName = match name.parse() {
        Ok(name) => name,
        Err(e) => return error_reply(&e),
    };
    reply(AgentOpResult::from_result(
        200,
        state.source.get_submodel_for_asset(&auth, asset_id, name).await,
    ))
}

async fn submodel_for_all_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Reply {
    let auth = match credential(&headers) {
        Ok(auth) => auth,
        Err(reply) => return reply,
    };
    let name: SubmodelName = match name.parse() {
        Ok(name) => name,
        Err(e) => return error_reply(&e),
    };
    match state.source.get_submodel_for_all_assets(&auth, name).await {
        Ok(outcome) => reply(outcome.into_op_result("submodel")),
        Err(e) => error_reply(&e),
    }
}

async fn sync_all_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Reply {
    let auth = match credential(&headers) {
        Ok(auth) => auth,
        Err(reply) => return reply,
    };
    reply(state.sync.sync_all(&auth).await)
}

async fn sync_asset_handler(
    State(state): State<Arc<AppState>>,
    asset_id: Result<Path<u64>, PathRejection>,
    headers: HeaderMap,
) -> Reply {
    let auth = match credential(&headers) {
        Ok(auth) => auth,
        Err(reply) => return reply,
    };
    let asset_id = match path_param(asset_id) {
        Ok(asset_id) => asset_id,
        Err(reply) => return reply,
    };
    reply(state.sync.sync_asset(&auth, asset_id).await)
}

async fn refresh_all_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Reply {
    let auth = match credential(&headers) {
        Ok(auth) => auth,
        Err(reply) => return reply,
    };
    reply(state.sync.refresh_all(&auth).await)
}

async fn refresh_handler(
    State(state): State<Arc<AppState>>,
    Path(id_short): Path<String>,
    headers: HeaderMap,
) -> Reply {
    let auth = match credential(&headers) {
        Ok(auth) => auth,
        Err(reply) => return reply,
    };
    reply(state.sync.refresh_aas(&auth, &id_short).await)
}

async fn repository_shells_handler(State(state): State<Arc<AppState>>) -> Reply {
    reply(AgentOpResult::from_result(200, state.repository.get_all_aas().await))
}

async fn repository_submodels_handler(State(state): State<Arc<AppState>>) -> Reply {
    reply(AgentOpResult::from_result(200, state.repository.get_all_submodels().await))
}

async fn delete_shell_handler(State(state): State<Arc<AppState>>, Path(encoded): Path<String>) -> Reply {
    info!(shell_id = %decode_for_log(&encoded), "Shell deletion requested");
    let shell_id = match decode_id(&encoded) {
        Ok(id) => id,
        Err(e) => return error_reply(&e),
    };
    match state.repository.delete_aas(&shell_id).await {
        Ok(_) => reply(AgentOpResult::ok(200, &json!({ "deleted": shell_id }))),
        Err(e) => error_reply(&e),
    }
}

#[derive(Debug, Deserialize)]
struct DummyParams {
    #[serde(default)]
    count: Option<usize>,
}

async fn dummy_handler(
    State(state): State<Arc<AppState>>,
    params: Result<Query<DummyParams>, QueryRejection>,
) -> Reply {
    let params = match query_params(params) {
        Ok(params) => params,
        Err(reply) => return reply,
    };
    reply(
        state
            .sync
            .push_dummies(params.count.unwrap_or(1), &state.dummy_base_url)
            .await,
    )
}

async fn flush_handler(State(state): State<Arc<AppState>>) -> Reply {
    reply(AgentOpResult::from_result(200, state.repository.flush().await))
}
