use std::collections::HashMap;
use std::sync::Arc;

use crate::document::SkippedManifest;
use crate::extension::{ActivationReport, ExtensionCatalog, ExtensionKey};

use super::PluginError;
use super::discovery::PluginDiscovery;
use super::manifest::{Include, PluginId, PluginMeta};
use super::namespace;
use super::plugin::Plugin;

/// Plugins of one project, keyed by id.
///
/// The map is only ever filled by [`refresh`](Self::refresh); a failed
/// refresh leaves it empty rather than half-populated.
#[derive(Debug)]
pub struct ServiceManager {
    discovery: PluginDiscovery,
    catalog: Option<ExtensionCatalog>,
    plugins: HashMap<PluginId, Plugin>,
    skipped: Vec<SkippedManifest>,
    reports: Vec<(PluginId, ActivationReport)>,
}

impl ServiceManager {
    pub fn new(discovery: PluginDiscovery) -> Self {
        Self {
            discovery,
            catalog: None,
            plugins: HashMap::new(),
            skipped: Vec::new(),
            reports: Vec::new(),
        }
    }

    /// Activate each plugin's declared extensions through `catalog` on refresh.
    pub fn with_catalog(mut self, catalog: ExtensionCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn discovery(&self) -> &PluginDiscovery {
        &self.discovery
    }

    pub fn catalog(&self) -> Option<&ExtensionCatalog> {
        self.catalog.as_ref()
    }

    /// Rebuild the plugin map from a fresh discovery pass.
    ///
    /// Returns the number of distinct plugin ids. When two manifests declare
    /// the same id, the one scanned last is kept.
    pub fn refresh(&mut self) -> Result<usize, PluginError> {
        self.plugins.clear();
        self.skipped.clear();
        self.reports.clear();

        let discovery = self.discovery.discover()?;
        let discovered = discovery.plugins.len();

        for plugin in discovery.plugins {
            let id = plugin.id().clone();
            if self.plugins.insert(id.clone(), plugin).is_some() {
                tracing::warn!("Duplicate plugin id '{}', keeping the last declaration", id);
            } else {
                tracing::debug!(plugin = %id, "Registered plugin");
            }
        }
        self.skipped = discovery.skipped;

        if let Some(catalog) = &self.catalog {
            let mut ids: Vec<PluginId> = self.plugins.keys().cloned().collect();
            ids.sort();
            for id in ids {
                if let Some(plugin) = self.plugins.get_mut(&id) {
                    let report = plugin.activate(catalog);
                    self.reports.push((id, report));
                }
            }
        }

        tracing::info!(
            plugins = self.plugins.len(),
            discovered,
            skipped = self.skipped.len(),
            "Plugin refresh complete"
        );
        Ok(self.plugins.len())
    }

    /// Drop the current state and rediscover.
    pub fn invalidate(&mut self) -> Result<usize, PluginError> {
        self.refresh()
    }

    pub fn get(&self, id: &str) -> Option<&Plugin> {
        self.plugins.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Plugin> {
        self.plugins.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.plugins.contains_key(id)
    }

    pub fn plugins(&self) -> impl Iterator<Item = &Plugin> {
        self.plugins.values()
    }

    pub fn ids(&self) -> Vec<&PluginId> {
        let mut ids: Vec<_> = self.plugins.keys().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Manifests skipped by the last refresh under `ScanPolicy::SkipInvalid`.
    pub fn skipped(&self) -> &[SkippedManifest] {
        &self.skipped
    }

    /// Per-plugin activation results of the last refresh, sorted by id.
    pub fn activation_reports(&self) -> &[(PluginId, ActivationReport)] {
        &self.reports
    }

    /// Instances registered under `I` for a `namespace:key` name, across
    /// every plugin sharing that namespace. Plugins are visited in id order.
    pub fn lookup<I: ?Sized + 'static>(&self, qualified: &str) -> Vec<Arc<I>> {
        let Some((ns, key)) = namespace::parse(qualified) else {
            return Vec::new();
        };
        let key = ExtensionKey::new(key);

        self.ids()
            .into_iter()
            .filter_map(|id| self.plugins.get(id))
            .filter(|plugin| plugin.namespace() == ns)
            .flat_map(|plugin| plugin.extensions().list::<I>(&key))
            .collect()
    }

    /// Includes that name neither a known plugin nor a classpath resource.
    pub fn missing_includes(&self) -> Vec<(&PluginId, &Include)> {
        let classpath = self.discovery.scanner().classpath();
        self.ids()
            .into_iter()
            .filter_map(|id| self.plugins.get(id).map(|plugin| (id, plugin)))
            .flat_map(|(id, plugin)| plugin.includes().iter().map(move |include| (id, include)))
            .filter(|(_, include)| {
                !self.contains(include.resource()) && classpath.find(include.resource()).is_none()
            })
            .collect()
    }

    /// Pretty JSON array of every plugin's metadata, sorted by id.
    pub fn snapshot(&self) -> Result<String, PluginError> {
        let metas: Vec<&PluginMeta> = self
            .ids()
            .into_iter()
            .filter_map(|id| self.plugins.get(id))
            .map(Plugin::meta)
            .collect();
        Ok(serde_json::to_string_pretty(&metas)?)
    }
}
