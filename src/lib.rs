//! # nexus-plugins
//!
//! Plugin manifest discovery and a namespace-scoped, typed extension
//! registry.
//!
//! Plugins are declared in XML manifests found on a [`Classpath`] (by
//! default every `META-INF/*.xml`). Each `<nexus-plugin>` names an id,
//! optional includes and an `<extensions>` block binding extension points
//! to interface and implementation names. A [`ServiceManager`] owns the
//! discovered plugins of one [`Project`]; an [`ExtensionCatalog`] maps the
//! manifest names to Rust types so extensions can be looked up as
//! `Arc<dyn Trait>`.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use nexus_plugins::prelude::*;
//!
//! trait Renderer: Send + Sync {
//!     fn backend(&self) -> &str;
//! }
//!
//! #[derive(Default)]
//! struct GlRenderer;
//!
//! impl Renderer for GlRenderer {
//!     fn backend(&self) -> &str {
//!         "gl"
//!     }
//! }
//!
//! impl Extension for GlRenderer {
//!     fn capabilities(self: Arc<Self>) -> Vec<Capability> {
//!         vec![Capability::of::<dyn Renderer>(self)]
//!     }
//! }
//!
//! fn main() -> nexus_plugins::Result<()> {
//!     let manifest = br#"<nexus-plugin>
//!         <id>engine.gl</id>
//!         <extensions namespace="engine">
//!             <renderer interface="engine.Renderer" class="engine.GlRenderer"/>
//!         </extensions>
//!     </nexus-plugin>"#;
//!     let classpath = Classpath::new().embedded("META-INF/gl.xml", manifest.as_slice());
//!
//!     let mut catalog = ExtensionCatalog::new();
//!     catalog
//!         .interface::<dyn Renderer>("engine.Renderer")
//!         .implementation_default::<GlRenderer>("engine.GlRenderer");
//!
//!     let mut services =
//!         ServiceManager::new(PluginDiscovery::new(DocumentScanner::new(classpath)))
//!             .with_catalog(catalog);
//!     services.refresh()?;
//!
//!     let renderers = services.lookup::<dyn Renderer>("engine:renderer");
//!     assert_eq!(renderers[0].backend(), "gl");
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod common;
pub mod config;
pub mod document;
pub mod extension;
pub mod observability;
pub mod plugins;
pub mod prelude;

pub use common::{Classpath, ClasspathEntry, EmbeddedResource, Resource, ResourceOrigin};
pub use config::{ConfigError, DiscoveryConfig};
pub use document::{Document, DocumentScanner, DocumentSource, Scan, ScanPolicy, SkippedManifest};
pub use extension::{
    ActivationReport, Capability, Extension, ExtensionCatalog, ExtensionKey, ExtensionManager,
    ExtensionWrapper, InterfaceMarker, Registration, RegistrationError,
};
pub use plugins::{
    Discovery, ExtensionEntry, Extensions, Include, Plugin, PluginDiscovery, PluginError, PluginId,
    PluginMeta, Project, ServiceManager,
};

/// Error type for nexus-plugins operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Manifest discovery or parsing failed.
    #[error("Plugin discovery failed: {0}")]
    Discovery(#[from] PluginError),

    /// An extension instance matched no declared interface.
    #[error("Extension registration failed: {0}")]
    Registration(#[from] RegistrationError),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),
}

/// Error category for unified error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Configuration values or files
    Configuration,
    /// A manifest that could not be read, decoded or parsed
    Manifest,
    /// Extension registration rejected
    Registration,
    /// IO, JSON and other unexpected failures
    Internal,
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::Env(_) => ErrorCategory::Configuration,

            Error::Discovery(
                PluginError::Resolve { .. } | PluginError::Decode { .. } | PluginError::Xml { .. },
            ) => ErrorCategory::Manifest,
            Error::Discovery(PluginError::Pattern(_)) => ErrorCategory::Configuration,

            Error::Registration(_) => ErrorCategory::Registration,

            Error::Discovery(_) | Error::Io(_) | Error::Json(_) => ErrorCategory::Internal,
        }
    }

    pub fn is_configuration_error(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }

    pub fn is_manifest_error(&self) -> bool {
        self.category() == ErrorCategory::Manifest
    }

    /// Manifest source the error refers to, if any.
    pub fn source_name(&self) -> Option<&str> {
        match self {
            Error::Discovery(err) => err.source_name(),
            _ => None,
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NotFound { key } => Error::Config(format!("Key not found: {}", key)),
            ConfigError::InvalidValue { key, message } => {
                Error::Config(format!("Invalid value for {}: {}", key, message))
            }
            ConfigError::Serialization(e) => Error::Json(e),
            ConfigError::Io(e) => Error::Io(e),
            ConfigError::Env(e) => Error::Env(e),
        }
    }
}

/// Result type alias for nexus-plugins operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_manifest() {
        let err: Error = PluginError::Resolve {
            name: "META-INF/a.xml".into(),
            cause: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Manifest);
        assert!(err.is_manifest_error());
        assert_eq!(err.source_name(), Some("META-INF/a.xml"));
    }

    #[test]
    fn test_error_category_config() {
        let err: Error = ConfigError::InvalidValue {
            key: "scan.policy".into(),
            message: "unknown scan policy 'sometimes'".into(),
        }
        .into();
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains("scan.policy"));

        let err: Error = PluginError::from(glob::Pattern::new("[").unwrap_err()).into();
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_error_category_registration() {
        let err: Error = RegistrationError::NoMatchingInterface {
            key: ExtensionKey::new("renderer"),
            type_name: "engine::Mixer",
            offered: vec!["dyn engine::Audio"],
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Registration);
        assert!(err.to_string().contains("engine::Mixer"));
        assert_eq!(err.source_name(), None);
    }

    #[test]
    fn test_config_error_flattening() {
        let io = std::io::Error::other("disk");
        let err: Error = ConfigError::Io(io).into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.category(), ErrorCategory::Internal);
    }
}
