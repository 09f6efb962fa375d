use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::provider::{ConfigProvider, ConfigProviderExt};
use super::{ConfigBuilder, ConfigError, ConfigResult};
use crate::common::{Classpath, home_dir};
use crate::document::{
    DEFAULT_MANIFEST_DIR, DEFAULT_MANIFEST_EXTENSION, DocumentScanner, ScanPolicy,
};

/// Project configuration file, looked up in the project root.
pub const CONFIG_FILE: &str = "nexus.json";
pub const ENV_PREFIX: &str = "NEXUS_";

const KEY_MANIFEST_DIR: &str = "manifest.dir";
const KEY_MANIFEST_EXTENSION: &str = "manifest.extension";
const KEY_SCAN_POLICY: &str = "scan.policy";
const KEY_CLASSPATH: &str = "classpath";
const KEY_INCLUDE_USER: &str = "classpath.include_user";

/// Where and how to look for plugin manifests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub manifest_dir: String,
    pub manifest_extension: String,
    pub policy: ScanPolicy,
    /// Extra classpath roots; relative entries resolve against the project root.
    pub classpath: Vec<PathBuf>,
    /// Append `~/.nexus/plugins` to the classpath.
    pub include_user: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            manifest_dir: DEFAULT_MANIFEST_DIR.to_string(),
            manifest_extension: DEFAULT_MANIFEST_EXTENSION.to_string(),
            policy: ScanPolicy::default(),
            classpath: Vec::new(),
            include_user: false,
        }
    }
}

impl DiscoveryConfig {
    /// `NEXUS_*` variables over `<root>/nexus.json` over defaults.
    pub fn load(project_root: &Path) -> ConfigResult<Self> {
        let provider = ConfigBuilder::new()
            .env_with_prefix(ENV_PREFIX)
            .file(project_root.join(CONFIG_FILE))
            .build()?;
        Self::from_provider(&provider)
    }

    pub fn from_provider(provider: &dyn ConfigProvider) -> ConfigResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            manifest_dir: provider
                .get_raw(KEY_MANIFEST_DIR)?
                .unwrap_or(defaults.manifest_dir),
            manifest_extension: provider
                .get_raw(KEY_MANIFEST_EXTENSION)?
                .map(|ext| ext.trim_start_matches('.').to_string())
                .unwrap_or(defaults.manifest_extension),
            policy: provider
                .get_parsed(KEY_SCAN_POLICY)?
                .unwrap_or(defaults.policy),
            classpath: match provider.get_raw(KEY_CLASSPATH)? {
                Some(raw) => parse_path_list(&raw)?,
                None => defaults.classpath,
            },
            include_user: provider
                .get_bool(KEY_INCLUDE_USER)?
                .unwrap_or(defaults.include_user),
        })
    }

    /// `~/.nexus/plugins`
    pub fn user_plugins_dir() -> Option<PathBuf> {
        home_dir().map(|home| home.join(".nexus").join("plugins"))
    }

    /// The project root, then configured roots, then the user root if enabled
    /// and present.
    pub fn classpath_for(&self, project_root: &Path) -> Classpath {
        let mut classpath = Classpath::new().directory(project_root);
        for entry in &self.classpath {
            classpath.push_directory(project_root.join(entry));
        }
        if self.include_user {
            match Self::user_plugins_dir() {
                Some(dir) if dir.is_dir() => classpath.push_directory(dir),
                Some(dir) => tracing::debug!("User plugin directory {} not found", dir.display()),
                None => tracing::warn!("Cannot resolve home directory for user plugins"),
            }
        }
        classpath
    }

    pub fn scanner(&self, classpath: Classpath) -> DocumentScanner {
        DocumentScanner::new(classpath)
            .path(self.manifest_dir.as_str())
            .extension(self.manifest_extension.as_str())
            .policy(self.policy)
    }
}

/// A JSON array of paths, or an OS path list (`a:b` / `a;b`).
fn parse_path_list(raw: &str) -> ConfigResult<Vec<PathBuf>> {
    let raw = raw.trim();
    if raw.starts_with('[') {
        return serde_json::from_str(raw).map_err(|e| ConfigError::InvalidValue {
            key: KEY_CLASSPATH.to_string(),
            message: e.to_string(),
        });
    }
    Ok(std::env::split_paths(raw)
        .filter(|p| !p.as_os_str().is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CompositeConfigProvider, EnvConfigProvider, MemoryConfigProvider};
    use crate::common::ClasspathEntry;

    #[test]
    fn test_defaults() {
        let config = DiscoveryConfig::from_provider(&MemoryConfigProvider::new()).unwrap();
        assert_eq!(config, DiscoveryConfig::default());
        assert_eq!(config.manifest_dir, "META-INF");
        assert_eq!(config.manifest_extension, "xml");
        assert_eq!(config.policy, ScanPolicy::FailFast);
    }

    #[test]
    fn test_from_provider() {
        let provider = MemoryConfigProvider::new()
            .value("manifest.dir", "plugins")
            .value("manifest.extension", ".plugin")
            .value("scan.policy", "skip_invalid")
            .value("classpath", r#"["lib","/opt/shared"]"#)
            .value("classpath.include_user", "true");

        let config = DiscoveryConfig::from_provider(&provider).unwrap();
        assert_eq!(config.manifest_dir, "plugins");
        assert_eq!(config.manifest_extension, "plugin");
        assert_eq!(config.policy, ScanPolicy::SkipInvalid);
        assert_eq!(
            config.classpath,
            vec![PathBuf::from("lib"), PathBuf::from("/opt/shared")]
        );
        assert!(config.include_user);
    }

    #[test]
    fn test_invalid_policy() {
        let provider = MemoryConfigProvider::new().value("scan.policy", "sometimes");
        let err = DiscoveryConfig::from_provider(&provider).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "scan.policy"));
    }

    #[test]
    fn test_path_list_forms() {
        assert_eq!(
            parse_path_list(r#"["a", "b"]"#).unwrap(),
            vec![PathBuf::from("a"), PathBuf::from("b")]
        );
        let joined = std::env::join_paths(["x", "y"]).unwrap();
        assert_eq!(
            parse_path_list(joined.to_str().unwrap()).unwrap(),
            vec![PathBuf::from("x"), PathBuf::from("y")]
        );
        assert!(parse_path_list("").unwrap().is_empty());
        assert!(parse_path_list("[1,").is_err());
    }

    #[test]
    fn test_layering_env_over_file_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{"manifest.dir": "from-file", "scan.policy": "skip_invalid"}"#,
        )
        .unwrap();

        // SAFETY: the key is only touched by this test, and std serializes
        // its own environment access.
        unsafe { std::env::set_var("NEXUS_LAYER_TEST_MANIFEST_DIR", "from-env") };
        let provider = ConfigBuilder::new()
            .env_with_prefix("NEXUS_LAYER_TEST_")
            .file(dir.path().join(CONFIG_FILE))
            .build()
            .unwrap();
        let config = DiscoveryConfig::from_provider(&provider).unwrap();
        unsafe { std::env::remove_var("NEXUS_LAYER_TEST_MANIFEST_DIR") };

        assert_eq!(config.manifest_dir, "from-env");
        assert_eq!(config.policy, ScanPolicy::SkipInvalid);
        assert_eq!(config.manifest_extension, "xml");
    }

    #[test]
    fn test_memory_layers() {
        let composite = CompositeConfigProvider::new()
            .provider(Box::new(MemoryConfigProvider::new().value("manifest.dir", "top")))
            .provider(Box::new(EnvConfigProvider::prefixed("NEXUS_UNSET_PREFIX_")))
            .provider(Box::new(
                MemoryConfigProvider::new()
                    .value("manifest.dir", "bottom")
                    .value("manifest.extension", "plugin"),
            ));
        let config = DiscoveryConfig::from_provider(&composite).unwrap();
        assert_eq!(config.manifest_dir, "top");
        assert_eq!(config.manifest_extension, "plugin");
    }

    #[test]
    fn test_classpath_for() {
        let root = Path::new("/work/project");
        let config = DiscoveryConfig {
            classpath: vec![PathBuf::from("vendor"), PathBuf::from("/opt/shared")],
            ..DiscoveryConfig::default()
        };

        let roots: Vec<PathBuf> = config
            .classpath_for(root)
            .entries()
            .iter()
            .filter_map(|entry| match entry {
                ClasspathEntry::Directory(path) => Some(path.clone()),
                ClasspathEntry::Embedded(_) => None,
            })
            .collect();
        assert_eq!(
            roots,
            vec![
                PathBuf::from("/work/project"),
                PathBuf::from("/work/project/vendor"),
                PathBuf::from("/opt/shared"),
            ]
        );
    }

    #[test]
    fn test_scanner_uses_config() {
        let config = DiscoveryConfig {
            policy: ScanPolicy::SkipInvalid,
            ..DiscoveryConfig::default()
        };
        let scanner = config.scanner(Classpath::new());
        assert_eq!(scanner.scan_policy(), ScanPolicy::SkipInvalid);
    }

    #[test]
    fn test_serde_defaults() {
        let config: DiscoveryConfig = serde_json::from_str(r#"{"include_user": true}"#).unwrap();
        assert!(config.include_user);
        assert_eq!(config.manifest_dir, "META-INF");
    }
}
