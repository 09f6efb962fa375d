//! File-based Configuration Provider
//!
//! Reads a JSON object once at construction. Keys may be written flat
//! (`"manifest.dir": "..."`) or nested (`"manifest": {"dir": "..."}`); the
//! flat form wins when both are present.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::ConfigResult;
use super::provider::ConfigProvider;

#[derive(Debug, Clone)]
pub struct FileConfigProvider {
    path: PathBuf,
    data: HashMap<String, Value>,
}

impl FileConfigProvider {
    /// Load `path`. A missing file yields an empty provider.
    pub fn load(path: impl Into<PathBuf>) -> ConfigResult<Self> {
        let path = path.into();
        let data = if path.is_file() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            HashMap::new()
        };
        Ok(Self { path, data })
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        if let Some(value) = self.data.get(key) {
            return Some(value);
        }
        let mut parts = key.split('.');
        let first = self.data.get(parts.next()?)?;
        parts.try_fold(first, |current, part| current.get(part))
    }
}

impl ConfigProvider for FileConfigProvider {
    fn name(&self) -> &str {
        "file"
    }

    fn get_raw(&self, key: &str) -> ConfigResult<Option<String>> {
        Ok(match self.lookup(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(v) => Some(v.to_string()),
        })
    }

    fn list_keys(&self, prefix: &str) -> ConfigResult<Vec<String>> {
        Ok(self
            .data
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}
