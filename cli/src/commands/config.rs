// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate, generate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use aas_mapper_core::domain::mapper_config::{MapperConfigManifest, RepositoryAuthConfig};

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show config file paths checked
        #[arg(long)]
        paths: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (default: discover)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Generate sample configuration
    Generate {
        /// Output path
        #[arg(short, long, default_value = "./aas-mapper-config.yaml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub async fn handle_command(command: ConfigCommand, config_override: Option<PathBuf>) -> Result<()> {
    match command {
        ConfigCommand::Show { paths } => show(config_override, paths).await,
        ConfigCommand::Validate { file } => validate(file.or(config_override)).await,
        ConfigCommand::Generate { output, force } => generate(output, force).await,
    }
}

async fn show(config_override: Option<PathBuf>, show_paths: bool) -> Result<()> {
    let config = MapperConfigManifest::load_or_default(config_override.clone())
        .context("Failed to load configuration")?;

    if show_paths {
        println!("{}", "Configuration discovery paths:".bold());
        match &config_override {
            Some(path) => println!("  0. --config flag: {}", path.display()),
            None => println!("  0. --config flag: {}", "(not set)".dimmed()),
        }
        for (index, path) in MapperConfigManifest::discovery_paths().iter().enumerate() {
            let marker = if path.exists() { "found".green() } else { "missing".dimmed() };
            println!("  {}. {} ({})", index + 1, path.display(), marker);
        }
        println!();
    }

    println!("{}", "Current configuration:".bold());
    println!();

    println!("{}", "Server:".bold());
    println!(
        "  Bind: {}:{}",
        config.spec.server.bind_address, config.spec.server.port
    );
    println!("  Identifier root: {}", config.server_root());
    println!();

    println!("{}", "Netilion:".bold());
    println!("  Endpoint: {}", config.spec.netilion.endpoint);
    println!(
        "  API key: {}",
        if config.spec.netilion.api_key.is_some() { "(set)" } else { "(none)" }
    );
    println!("  Page size: {}", config.spec.netilion.per_page);
    println!();

    println!("{}", "AAS Repository:".bold());
    println!("  Endpoint: {}", config.spec.repository.endpoint);
    println!("  Page limit: {}", config.spec.repository.page_limit);
    let auth = match &config.spec.repository.auth {
        RepositoryAuthConfig::None => "none".to_string(),
        RepositoryAuthConfig::Bearer { .. } => "bearer token".to_string(),
        RepositoryAuthConfig::ClientCredentials { token_url, client_id, .. } => {
            format!("client credentials ({} @ {})", client_id, token_url)
        }
    };
    println!("  Auth: {}", auth);
    println!();

    println!("{}", "Observability:".bold());
    println!(
        "  Log: {} ({})",
        config.spec.observability.log_level, config.spec.observability.log_format
    );
    println!();

    Ok(())
}

async fn validate(config_path: Option<PathBuf>) -> Result<()> {
    println!("Validating configuration...");

    let config = MapperConfigManifest::load_or_default(config_path)
        .context("Failed to load configuration")?;

    config
        .validate()
        .context("Configuration validation failed")?;

    println!("{}", "✓ Configuration is valid".green());

    Ok(())
}

async fn generate(output: PathBuf, force: bool) -> Result<()> {
    if output.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            output.display()
        );
    }

    MapperConfigManifest::default()
        .to_yaml_file(&output)
        .with_context(|| format!("Failed to write config to {:?}", output))?;

    println!(
        "{}",
        format!("✓ Configuration generated: {}", output.display()).green()
    );

    Ok(())
}
