// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Netilion AAS Mapper CLI
//!
//! The `aas-mapper` binary hosts the mapper HTTP surface and exposes the
//! synchronization operations for one-shot use from a shell or a cron job.
//!
//! ## Commands
//!
//! - `aas-mapper serve` - Start the HTTP API
//! - `aas-mapper sync --asset ID | --all` - Push mapped shells into the repository
//! - `aas-mapper refresh [ID_SHORT]` - Re-sync shells already in the repository
//! - `aas-mapper flush` - Delete loopback-rooted test shells
//! - `aas-mapper config show|validate|generate` - Configuration management

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use aas_mapper_core::domain::mapper_config::MapperConfigManifest;

mod commands;

use commands::{ConfigCommand, SyncArgs};

/// Netilion to Asset Administration Shell mapper
#[derive(Parser)]
#[command(name = "aas-mapper")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "AAS_MAPPER_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); defaults to the configured level
    #[arg(long, global = true, env = "AAS_MAPPER_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    #[command(name = "serve")]
    Serve,

    /// Map Netilion assets and push them into the AAS repository
    #[command(name = "sync")]
    Sync {
        #[command(flatten)]
        args: SyncArgs,
    },

    /// Re-sync mapper shells already present in the repository
    #[command(name = "refresh")]
    Refresh {
        /// Shell idShort (NetilionAAS_{assetId}); all mapper shells when omitted
        #[arg(value_name = "ID_SHORT")]
        id_short: Option<String>,

        /// Netilion Authorization header value
        #[arg(long, env = "NETILION_AUTH", hide_env_values = true)]
        auth: String,
    },

    /// Delete every loopback-rooted shell and its submodels
    #[command(name = "flush")]
    Flush,

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is not an error
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logging is configured before anything else logs, so peek at the config
    // file only for the observability settings
    let observability = MapperConfigManifest::load_or_default(cli.config.clone())
        .map(|config| config.spec.observability)
        .unwrap_or_default();
    let level = cli.log_level.clone().unwrap_or(observability.log_level);
    init_logging(&level, &observability.log_format)?;

    match cli.command {
        Some(Commands::Serve) => commands::serve::handle_command(cli.config).await,
        Some(Commands::Sync { args }) => commands::sync::sync(args, cli.config).await,
        Some(Commands::Refresh { id_short, auth }) => {
            commands::sync::refresh(id_short, auth, cli.config).await
        }
        Some(Commands::Flush) => commands::sync::flush(cli.config).await,
        Some(Commands::Config { command }) => {
            commands::config::handle_command(command, cli.config).await
        }
        None => {
            eprintln!("{}", "No command specified. Use --help for usage.".yellow());
            std::process::exit(1);
        }
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str, format: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if format == "json" {
        builder.json().init();
    } else {
        builder.compact().init();
    }

    Ok(())
}
