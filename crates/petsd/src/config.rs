//! Daemon configuration
//!
//! ```toml
//! [service]
//! port = 7007
//! listen = true
//! name = "aggregate-service"
//! route = "pets"
//!
//! [observability]
//! enable = true
//!
//! [[backends]]
//! name = "dogs"
//! host = "localhost"
//! port = 7002
//! context = "/dogs/v1/data"
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use pets_core::routing::local_hostname;
use pets_core::BackendDescriptor;
use pets_gateway::{GatewaySettings, DEFAULT_ROUTE, DEFAULT_SERVICE_NAME};
use serde::Deserialize;

/// File name looked up when no path is given on the command line
pub const CONFIG_FILE_NAME: &str = "pets_config.toml";

/// Directory override for the configuration file
pub const CONFIG_DIR_ENV: &str = "SERVICE_CONFIG_DIR";

pub const DEFAULT_PORT: u16 = 7007;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub backends: Vec<BackendDescriptor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// When false the daemon exits without serving
    #[serde(default = "default_true")]
    pub listen: bool,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_route")]
    pub route: String,
    #[serde(default)]
    pub hostname: Option<String>,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_true() -> bool {
    true
}

fn default_name() -> String {
    DEFAULT_SERVICE_NAME.to_string()
}

fn default_route() -> String {
    DEFAULT_ROUTE.to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            listen: true,
            name: default_name(),
            route: default_route(),
            hostname: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    /// Propagate trace context to backends
    #[serde(default = "default_true")]
    pub enable: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self { enable: true }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("Invalid configuration")
    }

    /// Load `path`, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Configuration file not found, using defaults"
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Failed to load {}", path.display()))
    }

    /// Identity of the gateway in aggregate responses
    pub fn gateway_settings(&self) -> GatewaySettings {
        GatewaySettings {
            service_name: self.service.name.clone(),
            route: self.service.route.clone(),
            hostname: self
                .service
                .hostname
                .clone()
                .unwrap_or_else(local_hostname),
        }
    }
}

/// Resolve the configuration file path
///
/// An explicit path wins. Otherwise `$SERVICE_CONFIG_DIR/pets_config.toml`,
/// then `pets_config.toml` next to the executable.
pub fn locate(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        if !dir.is_empty() {
            tracing::info!("Load configuration from {}", dir);
            return Path::new(&dir).join(CONFIG_FILE_NAME);
        }
    }

    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}
