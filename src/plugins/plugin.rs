use crate::extension::{ActivationReport, ExtensionCatalog, ExtensionManager};

use super::manifest::{Extensions, Include, PluginId, PluginMeta};

/// A discovered plugin and the extension points of its namespace.
#[derive(Debug)]
pub struct Plugin {
    meta: PluginMeta,
    extensions: ExtensionManager,
}

impl Plugin {
    pub fn create(meta: PluginMeta) -> Self {
        let extensions = ExtensionManager::new(meta.extensions.namespace.clone());
        Self { meta, extensions }
    }

    pub fn id(&self) -> &PluginId {
        &self.meta.id
    }

    pub fn meta(&self) -> &PluginMeta {
        &self.meta
    }

    pub fn includes(&self) -> &[Include] {
        &self.meta.includes
    }

    /// Extension declarations from the manifest.
    pub fn declared_extensions(&self) -> &Extensions {
        &self.meta.extensions
    }

    pub fn namespace(&self) -> &str {
        self.extensions.namespace()
    }

    pub fn extensions(&self) -> &ExtensionManager {
        &self.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut ExtensionManager {
        &mut self.extensions
    }

    /// Declare and instantiate the manifest's extensions through `catalog`.
    pub fn activate(&mut self, catalog: &ExtensionCatalog) -> ActivationReport {
        catalog.activate(&self.meta.extensions, &mut self.extensions)
    }
}
