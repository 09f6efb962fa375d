use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

pub(crate) const INVALID_ID: &str = "invalid_id";
pub(crate) const INVALID_RESOURCE: &str = "invalid_resource";

/// Identifier of a plugin, taken from the manifest's `<id>` element.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginId(String);

impl PluginId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Sentinel used when a manifest has no `<id>`.
    pub fn invalid() -> Self {
        Self(INVALID_ID.to_string())
    }

    pub fn is_invalid(&self) -> bool {
        self.0 == INVALID_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for PluginId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PluginId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PluginId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A resource referenced by `<include resource="..."/>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Include(String);

impl Include {
    pub fn new(resource: impl Into<String>) -> Self {
        Self(resource.into())
    }

    pub fn invalid() -> Self {
        Self(INVALID_RESOURCE.to_string())
    }

    pub fn resource(&self) -> &str {
        &self.0
    }

    pub fn is_invalid(&self) -> bool {
        self.0 == INVALID_RESOURCE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtensionEntry {
    Interface { name: String, interface: String },
    Implementation { name: String, class: String },
}

impl ExtensionEntry {
    pub fn interface(name: impl Into<String>, interface: impl Into<String>) -> Self {
        Self::Interface {
            name: name.into(),
            interface: interface.into(),
        }
    }

    pub fn implementation(name: impl Into<String>, class: impl Into<String>) -> Self {
        Self::Implementation {
            name: name.into(),
            class: class.into(),
        }
    }

    /// Extension point name (the XML element tag).
    pub fn name(&self) -> &str {
        match self {
            Self::Interface { name, .. } | Self::Implementation { name, .. } => name,
        }
    }

    /// Interface or class name the entry binds.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Interface { interface, .. } => interface,
            Self::Implementation { class, .. } => class,
        }
    }

    pub fn is_interface(&self) -> bool {
        matches!(self, Self::Interface { .. })
    }
}

/// The `<extensions namespace="...">` block of a plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extensions {
    pub namespace: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<ExtensionEntry>,
}

impl Extensions {
    pub fn new(namespace: impl Into<String>, entries: Vec<ExtensionEntry>) -> Self {
        Self {
            namespace: namespace.into(),
            entries,
        }
    }

    /// No `<extensions>` block, or one without a namespace.
    pub const fn empty() -> Self {
        Self {
            namespace: String::new(),
            entries: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.namespace.is_empty() && self.entries.is_empty()
    }

    pub fn interfaces(&self) -> impl Iterator<Item = &ExtensionEntry> {
        self.entries.iter().filter(|e| e.is_interface())
    }

    pub fn implementations(&self) -> impl Iterator<Item = &ExtensionEntry> {
        self.entries.iter().filter(|e| !e.is_interface())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginMeta {
    pub id: PluginId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<Include>,
    #[serde(default, skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
}

impl PluginMeta {
    pub fn new(id: impl Into<PluginId>) -> Self {
        Self {
            id: id.into(),
            includes: Vec::new(),
            extensions: Extensions::empty(),
        }
    }

    pub fn with_includes(mut self, includes: Vec<Include>) -> Self {
        self.includes = includes;
        self
    }

    pub fn with_extensions(mut self, extensions: Extensions) -> Self {
        self.extensions = extensions;
        self
    }
}
