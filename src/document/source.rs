//! Manifest source abstraction.
//!
//! `DocumentSource` names where the text of a manifest comes from. Nothing
//! is read until [`DocumentSource::resolve`] is called; resolving consumes
//! the source, so any file handle or stream it owns is released when the
//! call returns, whether it succeeded or not.

use std::fmt;
use std::io::Read;
use std::path::PathBuf;

use crate::common::{Resource, ResourceOrigin};
use crate::plugins::PluginError;

pub enum DocumentSource {
    /// File system path
    File { path: PathBuf },

    /// Arbitrary byte stream, read to the end
    Stream {
        name: String,
        reader: Box<dyn Read + Send>,
    },

    /// Resource located on the classpath
    Resource(Resource),

    /// Text already in memory (code-defined manifests)
    Text { name: String, content: String },
}

impl DocumentSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }

    pub fn stream(name: impl Into<String>, reader: impl Read + Send + 'static) -> Self {
        Self::Stream {
            name: name.into(),
            reader: Box::new(reader),
        }
    }

    pub fn resource(resource: Resource) -> Self {
        Self::Resource(resource)
    }

    pub fn text(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Text {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Display name used in errors and logs.
    pub fn name(&self) -> String {
        match self {
            Self::File { path } => path.display().to_string(),
            Self::Stream { name, .. } | Self::Text { name, .. } => name.clone(),
            Self::Resource(resource) => resource.to_string(),
        }
    }

    /// Read all bytes and decode them as UTF-8.
    pub fn resolve(self) -> Result<String, PluginError> {
        let name = self.name();
        let resolve_err = |cause| PluginError::Resolve {
            name: name.clone(),
            cause,
        };
        let bytes = match self {
            Self::File { path } => std::fs::read(&path).map_err(resolve_err)?,
            Self::Stream { mut reader, .. } => {
                let mut buf = Vec::new();
                reader.read_to_end(&mut buf).map_err(resolve_err)?;
                buf
            }
            Self::Resource(resource) => match resource.into_origin() {
                ResourceOrigin::File(path) => std::fs::read(&path).map_err(resolve_err)?,
                ResourceOrigin::Embedded(bytes) => bytes.into_owned(),
            },
            Self::Text { content, .. } => return Ok(content),
        };

        String::from_utf8(bytes).map_err(|cause| PluginError::Decode { name, cause })
    }
}

impl fmt::Debug for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File { path } => f.debug_struct("File").field("path", path).finish(),
            Self::Stream { name, .. } => f.debug_struct("Stream").field("name", name).finish(),
            Self::Resource(resource) => f.debug_tuple("Resource").field(resource).finish(),
            Self::Text { name, content } => f
                .debug_struct("Text")
                .field("name", name)
                .field("len", &content.len())
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Classpath;
    use std::io::Write;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct TrackedReader {
        data: std::io::Cursor<Vec<u8>>,
        fail: bool,
        dropped: Arc<AtomicBool>,
    }

    impl Read for TrackedReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.fail {
                return Err(std::io::Error::other("stream broke"));
            }
            self.data.read(buf)
        }
    }

    impl Drop for TrackedReader {
        fn drop(&mut self) {
            self.dropped.store(true, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_resolve_text() {
        let source = DocumentSource::text("inline", "<nexus-plugin/>");
        assert_eq!(source.name(), "inline");
        assert_eq!(source.resolve().unwrap(), "<nexus-plugin/>");
    }

    #[test]
    fn test_resolve_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "<nexus-plugin><id>core</id></nexus-plugin>").unwrap();

        let source = DocumentSource::file(file.path());
        assert_eq!(source.name(), file.path().display().to_string());
        assert!(source.resolve().unwrap().contains("<id>core</id>"));
    }

    #[test]
    fn test_resolve_file_not_found() {
        let err = DocumentSource::file("/nonexistent/path/plugin.xml")
            .resolve()
            .unwrap_err();
        assert!(matches!(err, PluginError::Resolve { ref name, .. } if name.contains("plugin.xml")));
    }

    #[test]
    fn test_resolve_stream_releases_reader() {
        let dropped = Arc::new(AtomicBool::new(false));
        let reader = TrackedReader {
            data: std::io::Cursor::new(b"<a/>".to_vec()),
            fail: false,
            dropped: dropped.clone(),
        };
        let text = DocumentSource::stream("memory", reader).resolve().unwrap();
        assert_eq!(text, "<a/>");
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[test]
    fn test_resolve_stream_failure_releases_reader() {
        let dropped = Arc::new(AtomicBool::new(false));
        let reader = TrackedReader {
            data: std::io::Cursor::new(Vec::new()),
            fail: true,
            dropped: dropped.clone(),
        };
        let err = DocumentSource::stream("broken", reader).resolve().unwrap_err();
        assert!(matches!(err, PluginError::Resolve { .. }));
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[test]
    fn test_resolve_invalid_utf8() {
        let err = DocumentSource::stream("latin1", std::io::Cursor::new(vec![0x3c, 0xff, 0x3e]))
            .resolve()
            .unwrap_err();
        assert!(matches!(err, PluginError::Decode { .. }));
    }

    #[test]
    fn test_resolve_embedded_resource() {
        let classpath = Classpath::new().embedded("META-INF/core.xml", b"<core/>".as_slice());
        let resource = classpath.find("META-INF/core.xml").unwrap();

        let source = DocumentSource::resource(resource);
        assert_eq!(source.name(), "embedded:META-INF/core.xml");
        assert_eq!(source.resolve().unwrap(), "<core/>");
    }
}
