//! Layered configuration for plugin discovery.
//!
//! ```rust,no_run
//! use nexus_plugins::config::{ConfigBuilder, DiscoveryConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = ConfigBuilder::new()
//!     .env_with_prefix("NEXUS_")
//!     .file("nexus.json")
//!     .build()?;
//! let config = DiscoveryConfig::from_provider(&provider)?;
//! # Ok(())
//! # }
//! ```

pub mod composite;
pub mod discovery;
pub mod env;
pub mod file;
pub mod memory;
pub mod provider;

pub use composite::CompositeConfigProvider;
pub use discovery::{CONFIG_FILE, DiscoveryConfig, ENV_PREFIX};
pub use env::EnvConfigProvider;
pub use file::FileConfigProvider;
pub use memory::MemoryConfigProvider;
pub use provider::{ConfigProvider, ConfigProviderExt};

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in configuration operations
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Key not found: {key}")]
    NotFound { key: String },

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment error: {0}")]
    Env(#[from] std::env::VarError),
}

/// Result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

enum Layer {
    Provider(Box<dyn ConfigProvider>),
    File(PathBuf),
}

/// Configuration builder. Layers added first take priority.
#[derive(Default)]
pub struct ConfigBuilder {
    layers: Vec<Layer>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add environment variable provider
    pub fn env(mut self) -> Self {
        self.layers
            .push(Layer::Provider(Box::new(EnvConfigProvider::new())));
        self
    }

    /// Add environment variable provider with prefix
    pub fn env_with_prefix(mut self, prefix: &str) -> Self {
        self.layers
            .push(Layer::Provider(Box::new(EnvConfigProvider::prefixed(prefix))));
        self
    }

    /// Add a JSON file, read when the builder is built
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.layers.push(Layer::File(path.into()));
        self
    }

    pub fn memory(mut self, provider: MemoryConfigProvider) -> Self {
        self.layers.push(Layer::Provider(Box::new(provider)));
        self
    }

    pub fn provider(mut self, provider: Box<dyn ConfigProvider>) -> Self {
        self.layers.push(Layer::Provider(provider));
        self
    }

    /// Build the composite configuration
    pub fn build(self) -> ConfigResult<CompositeConfigProvider> {
        let mut composite = CompositeConfigProvider::new();
        for layer in self.layers {
            let provider: Box<dyn ConfigProvider> = match layer {
                Layer::Provider(provider) => provider,
                Layer::File(path) => Box::new(FileConfigProvider::load(path)?),
            };
            composite.add_provider(provider);
        }
        Ok(composite)
    }
}
