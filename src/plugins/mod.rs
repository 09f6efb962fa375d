//! Plugin discovery and per-project plugin state.
//!
//! A plugin is declared by a `<nexus-plugin>` element in a manifest found on
//! the project classpath (by default `META-INF/*.xml`). Its extensions live
//! in a namespace and are addressed as `namespace:key`.
//!
//! # Layout
//!
//! ```text
//! project/
//! ├── nexus.json            optional discovery settings
//! ├── META-INF/
//! │   └── renderer.xml
//! └── vendor/               extra root from `classpath`
//!     └── META-INF/
//!         └── audio.xml
//! ```

mod discovery;
mod error;
mod manager;
mod manifest;
pub mod namespace;
mod plugin;
mod project;

pub use discovery::{Discovery, PluginDiscovery};
pub use error::PluginError;
pub use manager::ServiceManager;
pub use manifest::{Extensions, ExtensionEntry, Include, PluginId, PluginMeta};
pub use plugin::Plugin;
pub use project::Project;
