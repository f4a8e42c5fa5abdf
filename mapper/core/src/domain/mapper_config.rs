// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Mapper Configuration Types
//
// Kubernetes-style manifest (apiVersion/kind/metadata/spec) describing:
// - HTTP server binding and the public URL used as identifier root
// - Netilion source endpoint and API key
// - AAS repository endpoint and its authentication mode
// - Logging settings

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const API_VERSION: &str = "aas-mapper/v1";
pub const KIND: &str = "MapperConfig";

/// Top-level configuration manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapperConfigManifest {
    /// API version (must be "aas-mapper/v1")
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Resource kind (must be "MapperConfig")
    pub kind: String,

    pub metadata: ManifestMetadata,

    pub spec: MapperConfigSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestMetadata {
    /// Deployment name
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapperConfigSpec {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub netilion: NetilionConfig,

    #[serde(default)]
    pub repository: RepositoryConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Public base URL of this service; root of every generated shell and
    /// submodel id
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetilionConfig {
    #[serde(default = "default_netilion_endpoint")]
    pub endpoint: String,

    /// Netilion API key (supports "env:VAR_NAME")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Page size for list requests
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    #[serde(default = "default_repository_endpoint")]
    pub endpoint: String,

    /// Page size for cursor-paged shell listing
    #[serde(default = "default_repository_page_limit")]
    pub page_limit: u32,

    #[serde(default)]
    pub auth: RepositoryAuthConfig,
}

/// How the mapper authenticates against the AAS repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RepositoryAuthConfig {
    #[default]
    None,

    /// Fixed bearer token (supports "env:VAR_NAME")
    Bearer { token: String },

    /// OAuth2 client-credentials grant
    ClientCredentials {
        token_url: String,
        client_id: String,
        /// Supports "env:VAR_NAME"
        client_secret: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scope: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// text or json
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            public_url: default_public_url(),
        }
    }
}

impl Default for NetilionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_netilion_endpoint(),
            api_key: None,
            per_page: default_per_page(),
        }
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            endpoint: default_repository_endpoint(),
            page_limit: default_repository_page_limit(),
            auth: RepositoryAuthConfig::None,
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_public_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_netilion_endpoint() -> String {
    "https://api.netilion.endress.com/v1".to_string()
}

fn default_per_page() -> u32 {
    100
}

fn default_repository_endpoint() -> String {
    "http://localhost:8081/api/v3.0".to_string()
}

fn default_repository_page_limit() -> u32 {
    100
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for MapperConfigManifest {
    fn default() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ManifestMetadata {
                name: "netilion-aas-mapper".to_string(),
                version: Some("1.0.0".to_string()),
            },
            spec: MapperConfigSpec::default(),
        }
    }
}

/// Resolve a secret that may be written as "env:VAR_NAME"
pub fn resolve_secret(value: &str) -> anyhow::Result<String> {
    match value.strip_prefix("env:") {
        Some(var_name) => std::env::var(var_name)
            .map_err(|_| anyhow::anyhow!("Environment variable not set: {}", var_name)),
        None => Ok(value.to_string()),
    }
}

impl MapperConfigManifest {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Candidate locations, in precedence order
    /// 1. AAS_MAPPER_CONFIG_PATH environment variable
    /// 2. ./aas-mapper-config.yaml (working directory)
    /// 3. ~/.aas-mapper/config.yaml (user home)
    /// 4. /etc/aas-mapper/config.yaml
    pub fn discovery_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Ok(path) = std::env::var("AAS_MAPPER_CONFIG_PATH") {
            paths.push(PathBuf::from(path));
        }
        paths.push(PathBuf::from("./aas-mapper-config.yaml"));
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".aas-mapper").join("config.yaml"));
        }
        paths.push(PathBuf::from("/etc/aas-mapper/config.yaml"));
        paths
    }

    pub fn discover_config() -> Option<PathBuf> {
        Self::discovery_paths().into_iter().find(|p| p.exists())
    }

    /// Load configuration with discovery, fallback to default
    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        // Explicit CLI path must exist and parse
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path)
                .map_err(|e| anyhow::anyhow!("Failed to load config at {:?}: {}", path, e))?;
            config.apply_env_overrides();
            return Ok(config);
        }

        let mut config = match Self::discover_config() {
            Some(config_path) => {
                tracing::info!("Loading configuration from discovered path: {:?}", config_path);
                Self::from_yaml_file(config_path)?
            }
            None => {
                tracing::warn!("No configuration file found in standard locations. Using defaults.");
                Self::default()
            }
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Environment variable overrides for container deployments
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("AAS_MAPPER_PUBLIC_URL") {
            tracing::info!("Environment override: AAS_MAPPER_PUBLIC_URL={}", val);
            self.spec.server.public_url = val;
        }
        if let Ok(val) = std::env::var("AAS_MAPPER_NETILION_ENDPOINT") {
            tracing::info!("Environment override: AAS_MAPPER_NETILION_ENDPOINT={}", val);
            self.spec.netilion.endpoint = val;
        }
        if let Ok(val) = std::env::var("AAS_MAPPER_REPOSITORY_ENDPOINT") {
            tracing::info!("Environment override: AAS_MAPPER_REPOSITORY_ENDPOINT={}", val);
            self.spec.repository.endpoint = val;
        }
        if let Ok(val) = std::env::var("AAS_MAPPER_PORT") {
            match val.parse::<u16>() {
                Ok(port) => {
                    tracing::info!("Environment override: AAS_MAPPER_PORT={}", port);
                    self.spec.server.port = port;
                }
                Err(_) => {
                    tracing::warn!("Invalid value for AAS_MAPPER_PORT: '{}'. Ignoring.", val);
                }
            }
        }
    }

    /// Identifier root: public URL without trailing slash
    pub fn server_root(&self) -> String {
        self.spec.server.public_url.trim_end_matches('/').to_string()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_version != API_VERSION {
            anyhow::bail!("Invalid apiVersion: '{}'. Must be '{}'", self.api_version, API_VERSION);
        }

        if self.kind != KIND {
            anyhow::bail!("Invalid kind: '{}'. Must be '{}'", self.kind, KIND);
        }

        if self.metadata.name.is_empty() {
            anyhow::bail!("metadata.name cannot be empty");
        }

        validate_url("spec.server.public_url", &self.spec.server.public_url)?;
        validate_url("spec.netilion.endpoint", &self.spec.netilion.endpoint)?;
        validate_url("spec.repository.endpoint", &self.spec.repository.endpoint)?;

        if !(1..=1000).contains(&self.spec.netilion.per_page) {
            anyhow::bail!(
                "spec.netilion.per_page must be between 1 and 1000, got {}",
                self.spec.netilion.per_page
            );
        }

        if self.spec.repository.page_limit == 0 {
            anyhow::bail!("spec.repository.page_limit must be greater than 0");
        }

        match &self.spec.repository.auth {
            RepositoryAuthConfig::None => {}
            RepositoryAuthConfig::Bearer { token } => {
                if token.is_empty() {
                    anyhow::bail!("spec.repository.auth.token cannot be empty");
                }
            }
            RepositoryAuthConfig::ClientCredentials { token_url, client_id, client_secret, .. } => {
                validate_url("spec.repository.auth.token_url", token_url)?;
                if client_id.is_empty() || client_secret.is_empty() {
                    anyhow::bail!("spec.repository.auth requires client_id and client_secret");
                }
            }
        }

        match self.spec.observability.log_format.as_str() {
            "text" | "json" => {}
            other => anyhow::bail!("Invalid log_format: '{}'. Must be 'text' or 'json'", other),
        }

        Ok(())
    }
}

fn validate_url(field: &str, value: &str) -> anyhow::Result<()> {
    if value.is_empty() {
        anyhow::bail!("{} cannot be empty", field);
    }
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        anyhow::bail!("{} must be an http(s) URL, got '{}'", field, value);
    }
    Ok(())
}
