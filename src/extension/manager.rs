use std::collections::HashMap;
use std::sync::Arc;

use super::{ExtensionKey, ExtensionWrapper};

/// Extension points of one namespace, one wrapper per key.
#[derive(Debug, Default)]
pub struct ExtensionManager {
    namespace: String,
    wrappers: HashMap<ExtensionKey, ExtensionWrapper>,
}

impl ExtensionManager {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            wrappers: HashMap::new(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Existing wrapper for `key`, or a new empty one.
    pub fn get(&mut self, key: impl Into<ExtensionKey>) -> &mut ExtensionWrapper {
        let key = key.into();
        self.wrappers
            .entry(key.clone())
            .or_insert_with(|| ExtensionWrapper::new(key))
    }

    pub fn find(&self, key: &ExtensionKey) -> Option<&ExtensionWrapper> {
        self.wrappers.get(key)
    }

    pub fn contains(&self, key: &ExtensionKey) -> bool {
        self.wrappers.contains_key(key)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> Vec<&ExtensionKey> {
        let mut keys: Vec<_> = self.wrappers.keys().collect();
        keys.sort();
        keys
    }

    /// Instances registered under `I` for `key`, without creating a wrapper.
    pub fn list<I: ?Sized + 'static>(&self, key: &ExtensionKey) -> Vec<Arc<I>> {
        self.find(key).map(|w| w.list::<I>()).unwrap_or_default()
    }

    pub fn first<I: ?Sized + 'static>(&self, key: &ExtensionKey) -> Option<Arc<I>> {
        self.find(key).and_then(|w| w.first::<I>())
    }

    pub fn len(&self) -> usize {
        self.wrappers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wrappers.is_empty()
    }
}
