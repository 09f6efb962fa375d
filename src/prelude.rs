//! Prelude module for convenient imports.
//!
//! ```rust
//! use nexus_plugins::prelude::*;
//! ```

pub use crate::Error;
pub use crate::Result;

// Classpath and manifests
pub use crate::common::Classpath;
pub use crate::document::{Document, DocumentScanner, DocumentSource, ScanPolicy};

// Plugins
pub use crate::plugins::{Plugin, PluginDiscovery, PluginId, PluginMeta, Project, ServiceManager};

// Extensions
pub use crate::extension::{
    Capability, Extension, ExtensionCatalog, ExtensionKey, ExtensionManager, ExtensionWrapper,
};

// Configuration
pub use crate::config::DiscoveryConfig;
