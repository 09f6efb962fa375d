use super::PluginError;
use super::plugin::Plugin;
use crate::document::{DocumentScanner, SkippedManifest};
use crate::observability::DiscoverySpan;

/// Result of one discovery pass.
#[derive(Debug, Default)]
pub struct Discovery {
    /// One entry per declared plugin, in scan order. Ids may repeat.
    pub plugins: Vec<Plugin>,
    pub skipped: Vec<SkippedManifest>,
}

#[derive(Debug, Clone)]
pub struct PluginDiscovery {
    scanner: DocumentScanner,
}

impl PluginDiscovery {
    pub fn new(scanner: DocumentScanner) -> Self {
        Self { scanner }
    }

    pub fn scanner(&self) -> &DocumentScanner {
        &self.scanner
    }

    pub fn discover(&self) -> Result<Discovery, PluginError> {
        let span = DiscoverySpan::new();
        let _guard = span.span().enter();

        let scan = self.scanner.scan()?;
        let mut plugins = Vec::with_capacity(scan.plugin_count());
        for document in scan.documents {
            let source = document.name().to_string();
            for meta in document.into_metas() {
                tracing::debug!(plugin = %meta.id, source = %source, "Discovered plugin");
                plugins.push(Plugin::create(meta));
            }
        }

        span.finish(plugins.len(), scan.skipped.len());
        Ok(Discovery {
            plugins,
            skipped: scan.skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Classpath;
    use crate::document::ScanPolicy;

    const PAIR: &[u8] = br#"<plugins>
        <nexus-plugin><id>a</id></nexus-plugin>
        <nexus-plugin><id>b</id><extensions namespace="ns"/></nexus-plugin>
    </plugins>"#;
    const DUPLICATE: &[u8] = b"<nexus-plugin><id>a</id></nexus-plugin>";

    fn ids(discovery: &Discovery) -> Vec<&str> {
        discovery.plugins.iter().map(|p| p.id().as_str()).collect()
    }

    #[test]
    fn test_discover_preserves_order_and_duplicates() {
        let classpath = Classpath::new()
            .embedded("META-INF/1.xml", PAIR)
            .embedded("META-INF/2.xml", DUPLICATE);

        let discovery = PluginDiscovery::new(DocumentScanner::new(classpath))
            .discover()
            .unwrap();
        assert_eq!(ids(&discovery), vec!["a", "b", "a"]);
        assert_eq!(discovery.plugins[1].namespace(), "ns");
        assert!(discovery.skipped.is_empty());
    }

    #[test]
    fn test_discover_empty() {
        let discovery = PluginDiscovery::new(DocumentScanner::new(Classpath::new()))
            .discover()
            .unwrap();
        assert!(discovery.plugins.is_empty());
    }

    #[test]
    fn test_discover_propagates_parse_error() {
        let classpath = Classpath::new().embedded("META-INF/bad.xml", b"<nexus-plugin>".as_slice());
        let result = PluginDiscovery::new(DocumentScanner::new(classpath)).discover();
        assert!(matches!(result, Err(PluginError::Xml { .. })));
    }

    #[test]
    fn test_discover_reports_skipped() {
        let classpath = Classpath::new()
            .embedded("META-INF/bad.xml", b"<nexus-plugin>".as_slice())
            .embedded("META-INF/good.xml", DUPLICATE);
        let scanner = DocumentScanner::new(classpath).policy(ScanPolicy::SkipInvalid);

        let discovery = PluginDiscovery::new(scanner).discover().unwrap();
        assert_eq!(ids(&discovery), vec!["a"]);
        assert_eq!(discovery.skipped.len(), 1);
    }
}
