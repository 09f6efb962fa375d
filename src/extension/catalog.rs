//! Startup-time table from manifest type names to runtime types.
//!
//! Manifests refer to interfaces and implementations by name
//! (`interface="engine.Renderer"`, `class="engine.GlRenderer"`). The catalog
//! is filled by the application before discovery runs and is what turns
//! those names into [`InterfaceMarker`]s and instances.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::{Extension, ExtensionKey, ExtensionManager, InterfaceMarker, RegistrationError};
use crate::plugins::{ExtensionEntry, Extensions};

pub type ExtensionFactory = Box<dyn Fn() -> Arc<dyn Extension> + Send + Sync>;

#[derive(Default)]
pub struct ExtensionCatalog {
    interfaces: HashMap<String, InterfaceMarker>,
    implementations: HashMap<String, ExtensionFactory>,
}

impl ExtensionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a manifest interface name to `I`.
    pub fn interface<I: ?Sized + 'static>(&mut self, name: impl Into<String>) -> &mut Self {
        self.interfaces.insert(name.into(), InterfaceMarker::of::<I>());
        self
    }

    /// Map a manifest class name to a factory.
    pub fn implementation<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> Arc<dyn Extension> + Send + Sync + 'static,
    {
        self.implementations.insert(name.into(), Box::new(factory));
        self
    }

    /// Map a manifest class name to `E::default()`.
    pub fn implementation_default<E: Extension + Default>(
        &mut self,
        name: impl Into<String>,
    ) -> &mut Self {
        self.implementation(name, || Arc::new(E::default()) as Arc<dyn Extension>)
    }

    pub fn marker(&self, name: &str) -> Option<InterfaceMarker> {
        self.interfaces.get(name).copied()
    }

    pub fn instantiate(&self, name: &str) -> Option<Arc<dyn Extension>> {
        self.implementations.get(name).map(|factory| factory())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.interfaces.contains_key(name) || self.implementations.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.interfaces.len() + self.implementations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty() && self.implementations.is_empty()
    }

    /// Apply a plugin's declared extensions to `manager`.
    ///
    /// All interface entries are declared before any implementation is
    /// instantiated, whatever their order in the manifest.
    pub fn activate(&self, extensions: &Extensions, manager: &mut ExtensionManager) -> ActivationReport {
        let mut report = ActivationReport::default();
        let ns = manager.namespace().to_string();

        for entry in extensions.interfaces() {
            let key = ExtensionKey::new(entry.name());
            match self.marker(entry.type_name()) {
                Some(marker) => {
                    manager.get(key.clone()).declare_marker(marker);
                    report.declared.push(key);
                }
                None => {
                    tracing::warn!(
                        "Unknown interface '{}' for extension point '{}'",
                        entry.type_name(),
                        key.qualified(&ns)
                    );
                    report.unknown.push(entry.clone());
                }
            }
        }

        for entry in extensions.implementations() {
            let key = ExtensionKey::new(entry.name());
            let Some(instance) = self.instantiate(entry.type_name()) else {
                tracing::warn!(
                    "Unknown implementation '{}' for extension point '{}'",
                    entry.type_name(),
                    key.qualified(&ns)
                );
                report.unknown.push(entry.clone());
                continue;
            };
            match manager.get(key.clone()).add(instance) {
                Ok(_) => report.registered.push(key),
                Err(err) => report.rejected.push(err),
            }
        }

        report
    }
}

impl fmt::Debug for ExtensionCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut implementations: Vec<&str> =
            self.implementations.keys().map(String::as_str).collect();
        implementations.sort_unstable();
        f.debug_struct("ExtensionCatalog")
            .field("interfaces", &self.interfaces)
            .field("implementations", &implementations)
            .finish()
    }
}

/// What [`ExtensionCatalog::activate`] did for one plugin.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ActivationReport {
    pub declared: Vec<ExtensionKey>,
    pub registered: Vec<ExtensionKey>,
    pub rejected: Vec<RegistrationError>,
    /// Entries whose interface or class name the catalog does not know.
    pub unknown: Vec<ExtensionEntry>,
}

impl ActivationReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty() && self.unknown.is_empty()
    }
}
