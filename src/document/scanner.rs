use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Document, DocumentSource};
use crate::common::Classpath;
use crate::observability::scan_span;
use crate::plugins::PluginError;

pub const DEFAULT_MANIFEST_DIR: &str = "META-INF";
pub const DEFAULT_MANIFEST_EXTENSION: &str = "xml";

/// What a scan does when one manifest cannot be read or parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanPolicy {
    /// Abort the whole scan on the first failing manifest.
    #[default]
    FailFast,
    /// Log the failure, record it in [`Scan::skipped`] and continue.
    SkipInvalid,
}

impl fmt::Display for ScanPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FailFast => write!(f, "fail_fast"),
            Self::SkipInvalid => write!(f, "skip_invalid"),
        }
    }
}

impl FromStr for ScanPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "fail_fast" | "abort" => Ok(Self::FailFast),
            "skip_invalid" | "skip" => Ok(Self::SkipInvalid),
            other => Err(format!("unknown scan policy '{}'", other)),
        }
    }
}

#[derive(Debug)]
pub struct SkippedManifest {
    pub resource: String,
    pub error: PluginError,
}

#[derive(Debug, Default)]
pub struct Scan {
    pub documents: Vec<Document>,
    pub skipped: Vec<SkippedManifest>,
}

impl Scan {
    pub fn plugin_count(&self) -> usize {
        self.documents.iter().map(|d| d.metas().len()).sum()
    }
}

#[derive(Debug, Clone)]
pub struct DocumentScanner {
    classpath: Classpath,
    path: String,
    extension: String,
    policy: ScanPolicy,
}

impl DocumentScanner {
    pub fn new(classpath: Classpath) -> Self {
        Self {
            classpath,
            path: DEFAULT_MANIFEST_DIR.to_string(),
            extension: DEFAULT_MANIFEST_EXTENSION.to_string(),
            policy: ScanPolicy::default(),
        }
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn policy(mut self, policy: ScanPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn classpath(&self) -> &Classpath {
        &self.classpath
    }

    pub fn scan_policy(&self) -> ScanPolicy {
        self.policy
    }

    pub fn scan(&self) -> Result<Scan, PluginError> {
        self.scan_for(&self.extension, &self.path)
    }

    /// Scan `path` for manifests ending in `.extension`, in classpath order.
    ///
    /// The policy applies to unreadable directories as well as to single
    /// manifests.
    pub fn scan_for(&self, extension: &str, path: &str) -> Result<Scan, PluginError> {
        let span = scan_span(path, extension);
        let _guard = span.enter();

        let entries = self.classpath.walk(path, extension)?;
        let mut scan = Scan::default();

        for entry in entries {
            let (name, loaded) = match entry {
                Ok(resource) => {
                    let name = resource.to_string();
                    (name, Document::new(DocumentSource::resource(resource)))
                }
                Err(error) => (error.source_name().unwrap_or(path).to_string(), Err(error)),
            };
            match loaded {
                Ok(document) => scan.documents.push(document),
                Err(error) => match self.policy {
                    ScanPolicy::FailFast => return Err(error),
                    ScanPolicy::SkipInvalid => {
                        tracing::warn!("Skipping manifest {}: {}", name, error);
                        scan.skipped.push(SkippedManifest {
                            resource: name,
                            error,
                        });
                    }
                },
            }
        }

        span.record("documents", scan.documents.len() as u64);
        span.record("skipped", scan.skipped.len() as u64);
        tracing::debug!(
            documents = scan.documents.len(),
            skipped = scan.skipped.len(),
            "Manifest scan finished"
        );
        Ok(scan)
    }
}
