// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the mapper CLI

pub mod config;
pub mod serve;
pub mod sync;

pub use self::config::ConfigCommand;
pub use self::sync::SyncArgs;

use anyhow::{Context, Result};
use std::sync::Arc;

use aas_mapper_core::application::repository_agent::RepositoryAgent;
use aas_mapper_core::application::source_agent::SourceAgent;
use aas_mapper_core::domain::mapper_config::MapperConfigManifest;
use aas_mapper_core::infrastructure::{AasRepositoryClient, NetilionClient};

/// Agents wired to the HTTP clients described by the configuration
pub(crate) fn build_agents(config: &MapperConfigManifest) -> Result<(Arc<SourceAgent>, Arc<RepositoryAgent>)> {
    let netilion = NetilionClient::from_config(&config.spec.netilion)
        .context("Failed to initialize Netilion client")?;
    let repository = AasRepositoryClient::from_config(&config.spec.repository)
        .context("Failed to initialize AAS repository client")?;

    Ok((
        Arc::new(SourceAgent::new(Arc::new(netilion), config.server_root())),
        Arc::new(RepositoryAgent::new(Arc::new(repository))),
    ))
}

/// Load and validate the configuration every runtime command starts from
pub(crate) fn load_config(config_path: Option<std::path::PathBuf>) -> Result<MapperConfigManifest> {
    let config = MapperConfigManifest::load_or_default(config_path).context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

/// Base URL dummy shells are rooted on
pub(crate) fn dummy_base_url(config: &MapperConfigManifest) -> String {
    format!("http://localhost:{}", config.spec.server.port)
}
