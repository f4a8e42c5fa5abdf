// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Synchronization commands
//!
//! Commands: sync, refresh, flush. Each runs one operation in-process and
//! prints the resulting JSON envelope.

use anyhow::Result;
use clap::{ArgGroup, Args};
use colored::Colorize;
use std::path::PathBuf;

use aas_mapper_core::application::sync_service::SyncService;
use aas_mapper_core::domain::agent_result::AgentOpResult;
use aas_mapper_core::domain::source::SourceCredential;

use super::{build_agents, load_config};

#[derive(Args)]
#[command(group(ArgGroup::new("target").required(true).args(["asset", "all"])))]
pub struct SyncArgs {
    /// Netilion asset id to synchronize
    #[arg(long, value_name = "ID")]
    asset: Option<u64>,

    /// Synchronize every asset visible to the credential
    #[arg(long)]
    all: bool,

    /// Netilion Authorization header value
    #[arg(long, env = "NETILION_AUTH", hide_env_values = true)]
    auth: String,
}

fn sync_service(config_path: Option<PathBuf>) -> Result<SyncService> {
    let config = load_config(config_path)?;
    let (source, repository) = build_agents(&config)?;
    Ok(SyncService::new(source, repository))
}

pub async fn sync(args: SyncArgs, config_path: Option<PathBuf>) -> Result<()> {
    let service = sync_service(config_path)?;
    let auth = SourceCredential::new(args.auth);

    let result = match args.asset {
        Some(asset_id) => {
            println!("Synchronizing asset {}...", asset_id);
            service.sync_asset(&auth, asset_id).await
        }
        None => {
            println!("Synchronizing all assets...");
            service.sync_all(&auth).await
        }
    };

    report("Sync", result)
}

pub async fn refresh(id_short: Option<String>, auth: String, config_path: Option<PathBuf>) -> Result<()> {
    let service = sync_service(config_path)?;
    let auth = SourceCredential::new(auth);

    let result = match id_short {
        Some(id_short) => {
            println!("Refreshing {}...", id_short);
            service.refresh_aas(&auth, &id_short).await
        }
        None => {
            println!("Refreshing all mapper shells...");
            service.refresh_all(&auth).await
        }
    };

    report("Refresh", result)
}

pub async fn flush(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;
    let (_, repository) = build_agents(&config)?;

    println!("Flushing loopback shells...");
    report("Flush", AgentOpResult::from_result(200, repository.flush().await))
}

/// Print the envelope; fail the process unless the operation succeeded at
/// least partially
fn report(operation: &str, result: AgentOpResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&result.json)?);

    match result.status {
        207 => {
            println!(
                "{}",
                format!("⚠ {} partially succeeded (HTTP 207)", operation).yellow()
            );
            Ok(())
        }
        status if result.is_success() => {
            println!("{}", format!("✓ {} completed (HTTP {})", operation, status).green());
            Ok(())
        }
        status => anyhow::bail!(
            "{} failed with HTTP {}: {}",
            operation,
            status,
            result.message().unwrap_or("unknown error")
        ),
    }
}
