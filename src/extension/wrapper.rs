use std::collections::HashMap;
use std::sync::Arc;

use super::{Capability, Extension, ExtensionKey, InterfaceMarker};

/// Outcome of a successful [`ExtensionWrapper::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub type_name: &'static str,
    /// Declared interfaces the instance was registered under.
    pub accepted: Vec<InterfaceMarker>,
    /// Capabilities the instance offered that this point does not declare.
    pub ignored: Vec<InterfaceMarker>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error(
        "Extension '{type_name}' does not implement any interface declared for '{key}' (offers: {})",
        .offered.join(", ")
    )]
    NoMatchingInterface {
        key: ExtensionKey,
        type_name: &'static str,
        offered: Vec<&'static str>,
    },
}

/// One extension point: declared interfaces plus accepted instances.
#[derive(Debug)]
pub struct ExtensionWrapper {
    key: ExtensionKey,
    interfaces: Vec<InterfaceMarker>,
    instances: HashMap<InterfaceMarker, Vec<Capability>>,
    registered: Vec<&'static str>,
}

impl ExtensionWrapper {
    pub fn new(key: ExtensionKey) -> Self {
        Self {
            key,
            interfaces: Vec::new(),
            instances: HashMap::new(),
            registered: Vec::new(),
        }
    }

    pub fn key(&self) -> &ExtensionKey {
        &self.key
    }

    /// Declare `I` as an accepted interface. Returns `false` if it already was.
    pub fn declare<I: ?Sized + 'static>(&mut self) -> bool {
        self.declare_marker(InterfaceMarker::of::<I>())
    }

    pub fn declare_marker(&mut self, marker: InterfaceMarker) -> bool {
        if self.interfaces.contains(&marker) {
            return false;
        }
        self.interfaces.push(marker);
        true
    }

    pub fn interfaces(&self) -> &[InterfaceMarker] {
        &self.interfaces
    }

    pub fn is_declared<I: ?Sized + 'static>(&self) -> bool {
        self.interfaces.contains(&InterfaceMarker::of::<I>())
    }

    /// Instantiate `E` with `Default` and add it.
    pub fn add_default<E: Extension + Default>(&mut self) -> Result<Registration, RegistrationError> {
        self.add(Arc::new(E::default()))
    }

    /// Register an instance under every declared interface it implements.
    ///
    /// Interfaces must be declared before instances are added; an instance
    /// matching none of them is rejected and logged.
    pub fn add(&mut self, instance: Arc<dyn Extension>) -> Result<Registration, RegistrationError> {
        let type_name = instance.type_name();
        let (accepted, ignored): (Vec<Capability>, Vec<Capability>) = instance
            .capabilities()
            .into_iter()
            .partition(|c| self.interfaces.contains(&c.marker()));

        if accepted.is_empty() {
            let err = RegistrationError::NoMatchingInterface {
                key: self.key.clone(),
                type_name,
                offered: ignored.iter().map(|c| c.marker().name()).collect(),
            };
            tracing::warn!("{}", err);
            return Err(err);
        }

        let registration = Registration {
            type_name,
            accepted: accepted.iter().map(Capability::marker).collect(),
            ignored: ignored.iter().map(Capability::marker).collect(),
        };
        for capability in accepted {
            self.instances
                .entry(capability.marker())
                .or_default()
                .push(capability);
        }
        self.registered.push(type_name);

        tracing::debug!(key = %self.key, extension = type_name, "Registered extension");
        Ok(registration)
    }

    /// All instances registered under `I`, in registration order.
    pub fn list<I: ?Sized + 'static>(&self) -> Vec<Arc<I>> {
        self.instances
            .get(&InterfaceMarker::of::<I>())
            .map(|caps| caps.iter().filter_map(Capability::downcast::<I>).collect())
            .unwrap_or_default()
    }

    pub fn first<I: ?Sized + 'static>(&self) -> Option<Arc<I>> {
        self.instances
            .get(&InterfaceMarker::of::<I>())
            .and_then(|caps| caps.iter().find_map(Capability::downcast::<I>))
    }

    /// Type names of every accepted instance, in registration order.
    pub fn registered(&self) -> &[&'static str] {
        &self.registered
    }

    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }
}
