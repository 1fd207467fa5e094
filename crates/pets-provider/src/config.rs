//! Provider configuration
//!
//! Data-driven description of one provider service: where it listens,
//! what it serves and how it misbehaves.
//!
//! ```toml
//! name = "fishes"
//! port = 7003
//! context = "/fishes/v1/data"
//! mode = "random_number"
//! frequency_error = 10
//!
//! [delay]
//! period = 100
//! amplitude = 0.5
//!
//! [[pets]]
//! name = "Nemo"
//! kind = "Poisson Clown"
//! age = 14
//! url = "https://example.org/nemo.jpg"
//! ```

use std::path::Path;

use pets_core::routing::local_hostname;
use pets_core::{Pet, Pets};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a provider configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Complete provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Collection name, also used in health paths and error messages
    #[serde(default = "default_name")]
    pub name: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path the collection is served under
    #[serde(default = "default_context")]
    pub context: String,

    /// Host name reported in collections; local host name when unset
    #[serde(default)]
    pub hostname: Option<String>,

    /// Response shaping mode
    #[serde(default)]
    pub mode: Mode,

    /// Fail every n-th call with 503; 0 disables
    #[serde(default)]
    pub frequency_error: u64,

    /// Sinusoidal response delay
    #[serde(default)]
    pub delay: DelayConfig,

    /// Items served by this provider, in order
    #[serde(default)]
    pub pets: Vec<PetEntry>,
}

fn default_name() -> String {
    "pets".to_string()
}

fn default_port() -> u16 {
    7003
}

fn default_context() -> String {
    "/pets/v1/data".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            port: default_port(),
            context: default_context(),
            hostname: None,
            mode: Mode::default(),
            frequency_error: 0,
            delay: DelayConfig::default(),
            pets: Vec::new(),
        }
    }
}

/// How much of the catalog each call returns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Every item, every time
    #[default]
    #[serde(alias = "ALL")]
    All,
    /// A random non-empty prefix of the catalog
    #[serde(alias = "RANDOM_NUMBER")]
    RandomNumber,
}

/// Delay parameters; `period == 0` disables the delay
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DelayConfig {
    /// Number of calls per quarter wave
    #[serde(default)]
    pub period: u64,
    /// Peak delay in seconds
    #[serde(default)]
    pub amplitude: f64,
}

/// One catalog entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PetEntry {
    pub name: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub url: String,
}

impl ProviderConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Host name reported in served collections
    pub fn reported_hostname(&self) -> String {
        self.hostname.clone().unwrap_or_else(local_hostname)
    }

    /// Path of the collection, always with a leading slash
    pub fn context_path(&self) -> String {
        let context = self.context.trim_end_matches('/');
        if context.starts_with('/') {
            context.to_string()
        } else {
            format!("/{}", context)
        }
    }

    /// The full catalog with 1-based indices and provider-relative URIs
    pub fn catalog(&self) -> Pets {
        let context = self.context_path();
        let items: Vec<Pet> = self
            .pets
            .iter()
            .zip(1u32..)
            .map(|(entry, index)| Pet {
                index,
                name: entry.name.clone(),
                kind: entry.kind.clone(),
                age: entry.age,
                url: entry.url.clone(),
                uri: format!("{}/{}", context, index),
                ..Default::default()
            })
            .collect();

        Pets {
            total: items.len() as u64,
            hostname: self.reported_hostname(),
            items,
            ..Default::default()
        }
    }
}
