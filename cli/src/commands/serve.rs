// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! HTTP server

use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use aas_mapper_core::presentation::api::{app, AppState};

use super::{build_agents, dummy_base_url, load_config};

pub async fn handle_command(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;
    info!(
        public_url = %config.spec.server.public_url,
        netilion = %config.spec.netilion.endpoint,
        repository = %config.spec.repository.endpoint,
        "Configuration loaded"
    );

    let (source, repository) = build_agents(&config)?;
    let router = app(AppState::new(source, repository, dummy_base_url(&config)));

    let addr = format!("{}:{}", config.spec.server.bind_address, config.spec.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Mapper listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Mapper shutting down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
