use std::path::{Path, PathBuf};

use super::PluginError;
use super::discovery::PluginDiscovery;
use super::manager::ServiceManager;
use crate::config::DiscoveryConfig;
use crate::extension::ExtensionCatalog;

/// A named workspace owning the plugin state discovered from its root.
#[derive(Debug)]
pub struct Project {
    name: String,
    root: PathBuf,
    services: ServiceManager,
}

impl Project {
    /// Build the classpath from `root` and `config`. Nothing is scanned
    /// until [`refresh`](Self::refresh).
    pub fn open(name: impl Into<String>, root: impl Into<PathBuf>, config: &DiscoveryConfig) -> Self {
        let root = root.into();
        let scanner = config.scanner(config.classpath_for(&root));
        Self {
            name: name.into(),
            root,
            services: ServiceManager::new(PluginDiscovery::new(scanner)),
        }
    }

    /// Like [`open`](Self::open), reading the configuration from the
    /// environment and `<root>/nexus.json`.
    pub fn load(name: impl Into<String>, root: impl Into<PathBuf>) -> crate::Result<Self> {
        let root = root.into();
        let config = DiscoveryConfig::load(&root)?;
        Ok(Self::open(name, root, &config))
    }

    pub fn with_catalog(mut self, catalog: ExtensionCatalog) -> Self {
        self.services = self.services.with_catalog(catalog);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn services(&self) -> &ServiceManager {
        &self.services
    }

    pub fn services_mut(&mut self) -> &mut ServiceManager {
        &mut self.services
    }

    pub fn refresh(&mut self) -> Result<usize, PluginError> {
        self.services.refresh()
    }

    /// Discard discovered plugins and rediscover from the project root.
    pub fn invalidate(&mut self) -> Result<usize, PluginError> {
        tracing::debug!(project = %self.name, "Invalidating plugin state");
        self.services.invalidate()
    }
}
