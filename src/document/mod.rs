//! Plugin manifests: where their text comes from, how it is parsed, and how
//! the classpath is scanned for them.
//!
//! ```xml
//! <nexus-plugin>
//!   <id>engine.core</id>
//!   <include resource="engine.base"/>
//!   <extensions namespace="engine">
//!     <renderer interface="engine.Renderer" class="engine.GlRenderer"/>
//!   </extensions>
//! </nexus-plugin>
//! ```

mod parse;
mod scanner;
mod source;

pub use parse::Document;
pub use scanner::{
    DEFAULT_MANIFEST_DIR, DEFAULT_MANIFEST_EXTENSION, DocumentScanner, Scan, ScanPolicy,
    SkippedManifest,
};
pub use source::DocumentSource;
