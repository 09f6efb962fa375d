//! Typed extension registry.
//!
//! Plugins declare extension points by name in their manifest. At runtime
//! each point is an [`ExtensionWrapper`] holding two separate registries:
//! the interfaces ([`InterfaceMarker`]) the point accepts, and the concrete
//! instances registered for it. An instance is accepted only when one of
//! the [`Capability`]s it reports matches a declared interface, and lookups
//! only ever return instances.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use nexus_plugins::extension::{Capability, Extension, ExtensionKey, ExtensionManager};
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
//! let mut manager = ExtensionManager::new("engine");
//! let wrapper = manager.get(ExtensionKey::new("renderer"));
//! wrapper.declare::<dyn Renderer>();
//! wrapper.add_default::<GlRenderer>().unwrap();
//!
//! let renderer = wrapper.first::<dyn Renderer>().unwrap();
//! assert_eq!(renderer.backend(), "gl");
//! ```

mod catalog;
mod manager;
mod wrapper;

pub use catalog::{ActivationReport, ExtensionCatalog, ExtensionFactory};
pub use manager::ExtensionManager;
pub use wrapper::{ExtensionWrapper, Registration, RegistrationError};

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::plugins::namespace;

/// Name of an extension point within a namespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtensionKey(String);

impl ExtensionKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Key for a service property name, e.g. `"renderer"` or `"Renderer"`.
    pub fn from_property(property: &str) -> Self {
        let mut chars = property.trim().chars();
        let name = match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect(),
            None => String::new(),
        };
        Self(name)
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// `namespace:key` form used for cross-plugin lookups.
    pub fn qualified(&self, ns: &str) -> String {
        namespace::qualify(ns, &self.0)
    }
}

impl fmt::Display for ExtensionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExtensionKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Runtime identity of an interface type such as `dyn Renderer`.
#[derive(Debug, Clone, Copy)]
pub struct InterfaceMarker {
    id: TypeId,
    name: &'static str,
}

impl InterfaceMarker {
    pub fn of<I: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<I>(),
            name: std::any::type_name::<I>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for InterfaceMarker {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for InterfaceMarker {}

impl Hash for InterfaceMarker {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for InterfaceMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// An instance viewed through one interface.
pub struct Capability {
    marker: InterfaceMarker,
    handle: Box<dyn Any + Send + Sync>,
}

impl Capability {
    pub fn of<I: ?Sized + Send + Sync + 'static>(instance: Arc<I>) -> Self {
        Self {
            marker: InterfaceMarker::of::<I>(),
            handle: Box::new(instance),
        }
    }

    pub fn marker(&self) -> InterfaceMarker {
        self.marker
    }

    pub(crate) fn downcast<I: ?Sized + 'static>(&self) -> Option<Arc<I>> {
        self.handle.downcast_ref::<Arc<I>>().cloned()
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Capability").field(&self.marker.name).finish()
    }
}

/// A concrete extension type.
///
/// `capabilities` plays the role of the type's ancestor chain: every
/// interface the instance can be looked up through.
pub trait Extension: Send + Sync + 'static {
    fn capabilities(self: Arc<Self>) -> Vec<Capability>;

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
