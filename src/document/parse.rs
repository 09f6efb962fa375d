use roxmltree::Node;

use super::DocumentSource;
use crate::plugins::{ExtensionEntry, Extensions, Include, PluginError, PluginId, PluginMeta};

const PLUGIN_TAG: &str = "nexus-plugin";
const ID_TAG: &str = "id";
const INCLUDE_TAG: &str = "include";
const EXTENSIONS_TAG: &str = "extensions";

const RESOURCE_ATTR: &str = "resource";
const NAMESPACE_ATTR: &str = "namespace";
const INTERFACE_ATTR: &str = "interface";
const CLASS_ATTR: &str = "class";

/// A parsed manifest.
///
/// The manifest text is dropped once parsing finishes; only the plugin
/// metadata and the source name are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    metas: Vec<PluginMeta>,
}

impl Document {
    pub fn new(source: DocumentSource) -> Result<Self, PluginError> {
        let name = source.name();
        let text = source.resolve()?;
        Self::parse(name, &text)
    }

    /// Parse manifest text. Fails as a whole on malformed XML.
    ///
    /// A `<!DOCTYPE>` is accepted and not validated against.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, PluginError> {
        let name = name.into();
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let xml = roxmltree::Document::parse_with_options(text, options).map_err(|cause| {
            PluginError::Xml {
                name: name.clone(),
                cause,
            }
        })?;

        let metas: Vec<PluginMeta> = xml
            .descendants()
            .filter(|n| is_element(n, PLUGIN_TAG))
            .map(parse_plugin)
            .collect();

        tracing::debug!(manifest = %name, plugins = metas.len(), "Parsed manifest");
        Ok(Self { name, metas })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metas(&self) -> &[PluginMeta] {
        &self.metas
    }

    pub fn into_metas(self) -> Vec<PluginMeta> {
        self.metas
    }

    pub fn is_empty(&self) -> bool {
        self.metas.is_empty()
    }
}

fn is_element(node: &Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && node.tag_name().name() == tag
}

fn child_elements<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |n| is_element(n, tag))
}

fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

fn parse_plugin(node: Node<'_, '_>) -> PluginMeta {
    let id = child_elements(node, ID_TAG)
        .next()
        .map(|n| PluginId::new(text_content(n).trim()))
        .unwrap_or_else(PluginId::invalid);

    let includes = child_elements(node, INCLUDE_TAG)
        .map(|n| {
            n.attribute(RESOURCE_ATTR)
                .map(Include::new)
                .unwrap_or_else(Include::invalid)
        })
        .collect();

    let extensions = child_elements(node, EXTENSIONS_TAG)
        .next()
        .map(parse_extensions)
        .unwrap_or_else(Extensions::empty);

    PluginMeta {
        id,
        includes,
        extensions,
    }
}

fn parse_extensions(node: Node<'_, '_>) -> Extensions {
    let Some(namespace) = node.attribute(NAMESPACE_ATTR) else {
        return Extensions::empty();
    };

    let mut entries = Vec::new();
    for child in node.children().filter(Node::is_element) {
        if child.attributes().next().is_none() {
            continue;
        }
        let name = child.tag_name().name();
        if let Some(interface) = child.attribute(INTERFACE_ATTR) {
            entries.push(ExtensionEntry::interface(name, interface));
        }
        if let Some(class) = child.attribute(CLASS_ATTR) {
            entries.push(ExtensionEntry::implementation(name, class));
        }
    }

    Extensions::new(namespace, entries)
}
