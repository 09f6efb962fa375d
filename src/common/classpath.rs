//! Ordered set of resource roots searched for plugin manifests.
//!
//! A root is either a directory on disk or an embedded table of resources
//! compiled into the binary (for example with `include_bytes!`). Roots are
//! searched in the order they were added, so earlier roots shadow later ones
//! in [`Classpath::find`] and come first in [`Classpath::resources`].

use std::borrow::Cow;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use super::directory::{find_files, has_extension, relative_name};
use crate::plugins::PluginError;

#[derive(Clone)]
pub struct EmbeddedResource {
    path: String,
    bytes: Cow<'static, [u8]>,
}

impl EmbeddedResource {
    pub fn new(path: impl Into<String>, bytes: impl Into<Cow<'static, [u8]>>) -> Self {
        Self {
            path: normalize(&path.into()),
            bytes: bytes.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Debug for EmbeddedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedResource")
            .field("path", &self.path)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub enum ClasspathEntry {
    Directory(PathBuf),
    Embedded(Vec<EmbeddedResource>),
}

/// Where a located resource lives.
#[derive(Debug, Clone)]
pub enum ResourceOrigin {
    File(PathBuf),
    Embedded(Cow<'static, [u8]>),
}

/// A resource found on the classpath.
#[derive(Debug, Clone)]
pub struct Resource {
    name: String,
    origin: ResourceOrigin,
}

impl Resource {
    /// Relative, `/`-separated name such as `META-INF/plugin.xml`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> &ResourceOrigin {
        &self.origin
    }

    pub fn file_path(&self) -> Option<&Path> {
        match &self.origin {
            ResourceOrigin::File(path) => Some(path),
            ResourceOrigin::Embedded(_) => None,
        }
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self.origin, ResourceOrigin::Embedded(_))
    }

    pub(crate) fn into_origin(self) -> ResourceOrigin {
        self.origin
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.origin {
            ResourceOrigin::File(path) => write!(f, "{}", path.display()),
            ResourceOrigin::Embedded(_) => write!(f, "embedded:{}", self.name),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Classpath {
    entries: Vec<ClasspathEntry>,
}

impl Classpath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.push_directory(path);
        self
    }

    pub fn embedded(mut self, path: impl Into<String>, bytes: impl Into<Cow<'static, [u8]>>) -> Self {
        self.push_embedded(EmbeddedResource::new(path, bytes));
        self
    }

    pub fn push_directory(&mut self, path: impl Into<PathBuf>) {
        self.entries.push(ClasspathEntry::Directory(path.into()));
    }

    /// Appends to the trailing embedded table, starting a new one if the
    /// last entry is a directory.
    pub fn push_embedded(&mut self, resource: EmbeddedResource) {
        match self.entries.last_mut() {
            Some(ClasspathEntry::Embedded(table)) => table.push(resource),
            _ => self.entries.push(ClasspathEntry::Embedded(vec![resource])),
        }
    }

    pub fn entries(&self) -> &[ClasspathEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All resources below `dir` whose name ends with `.extension`.
    ///
    /// Fails on the first directory that cannot be read.
    pub fn resources(&self, dir: &str, extension: &str) -> Result<Vec<Resource>, PluginError> {
        self.walk(dir, extension)?.into_iter().collect()
    }

    /// Like [`resources`](Self::resources), but a directory that cannot be
    /// read is yielded in place as an `Err` entry and the walk goes on.
    pub fn walk(
        &self,
        dir: &str,
        extension: &str,
    ) -> Result<Vec<Result<Resource, PluginError>>, PluginError> {
        let dir = normalize(dir);
        let prefix = format!("{}/", dir);
        let mut found = Vec::new();

        for entry in &self.entries {
            match entry {
                ClasspathEntry::Directory(root) => {
                    for file in find_files(root, &dir, extension)? {
                        found.push(file.map(|path| Resource {
                            name: relative_name(root, &path),
                            origin: ResourceOrigin::File(path),
                        }));
                    }
                }
                ClasspathEntry::Embedded(table) => {
                    found.extend(
                        table
                            .iter()
                            .filter(|r| {
                                (dir.is_empty() || r.path.starts_with(&prefix))
                                    && has_extension(&r.path, extension)
                            })
                            .map(|r| {
                                Ok(Resource {
                                    name: r.path.clone(),
                                    origin: ResourceOrigin::Embedded(r.bytes.clone()),
                                })
                            }),
                    );
                }
            }
        }

        Ok(found)
    }

    /// First resource named `name`, searching roots in order.
    ///
    /// Names with `..` or a drive prefix never match.
    pub fn find(&self, name: &str) -> Option<Resource> {
        let name = normalize(name);
        if name.is_empty() || escapes_root(&name) {
            return None;
        }

        self.entries.iter().find_map(|entry| match entry {
            ClasspathEntry::Directory(root) => {
                let path = root.join(&name);
                path.is_file().then(|| Resource {
                    name: name.clone(),
                    origin: ResourceOrigin::File(path),
                })
            }
            ClasspathEntry::Embedded(table) => {
                table.iter().find(|r| r.path == name).map(|r| Resource {
                    name: r.path.clone(),
                    origin: ResourceOrigin::Embedded(r.bytes.clone()),
                })
            }
        })
    }
}

fn normalize(path: &str) -> String {
    path.replace('\\', "/").trim_matches('/').to_string()
}

fn escapes_root(name: &str) -> bool {
    Path::new(name).components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_resources_filtered() {
        let classpath = Classpath::new()
            .embedded("META-INF/core.xml", b"<a/>".as_slice())
            .embedded("/META-INF/extra.xml", b"<b/>".as_slice())
            .embedded("META-INF/notes.txt", b"text".as_slice())
            .embedded("assets/other.xml", b"<c/>".as_slice());

        let resources = classpath.resources("META-INF", "xml").unwrap();
        let names: Vec<&str> = resources.iter().map(Resource::name).collect();
        assert_eq!(names, vec!["META-INF/core.xml", "META-INF/extra.xml"]);
        assert!(resources.iter().all(Resource::is_embedded));
    }

    #[test]
    fn test_embedded_entries_coalesce() {
        let classpath = Classpath::new()
            .embedded("META-INF/a.xml", b"".as_slice())
            .embedded("META-INF/b.xml", b"".as_slice())
            .directory("/tmp/does-not-matter")
            .embedded("META-INF/c.xml", b"".as_slice());
        assert_eq!(classpath.entries().len(), 3);
    }

    #[test]
    fn test_directory_and_embedded_order() {
        let temp = tempfile::tempdir().unwrap();
        let meta_inf = temp.path().join("META-INF");
        std::fs::create_dir_all(&meta_inf).unwrap();
        std::fs::write(meta_inf.join("disk.xml"), "<x/>").unwrap();

        let classpath = Classpath::new()
            .embedded("META-INF/first.xml", b"<x/>".as_slice())
            .directory(temp.path())
            .directory(temp.path().join("missing"));

        let resources = classpath.resources("META-INF", "xml").unwrap();
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].name(), "META-INF/first.xml");
        assert_eq!(resources[1].name(), "META-INF/disk.xml");
        assert_eq!(
            resources[1].file_path(),
            Some(meta_inf.join("disk.xml").as_path())
        );
    }

    #[test]
    fn test_find_first_root_wins() {
        let temp = tempfile::tempdir().unwrap();
        let meta_inf = temp.path().join("META-INF");
        std::fs::create_dir_all(&meta_inf).unwrap();
        std::fs::write(meta_inf.join("shared.xml"), "<disk/>").unwrap();

        let classpath = Classpath::new()
            .directory(temp.path())
            .embedded("META-INF/shared.xml", b"<embedded/>".as_slice())
            .embedded("META-INF/only-embedded.xml", b"<e/>".as_slice());

        let shared = classpath.find("META-INF/shared.xml").unwrap();
        assert!(!shared.is_embedded());

        let embedded = classpath.find("/META-INF/only-embedded.xml").unwrap();
        assert!(embedded.is_embedded());
        assert_eq!(embedded.to_string(), "embedded:META-INF/only-embedded.xml");

        assert!(classpath.find("META-INF/none.xml").is_none());
        assert!(classpath.find("").is_none());
    }

    #[test]
    fn test_find_rejects_parent_components() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("root");
        std::fs::create_dir_all(root.join("META-INF")).unwrap();
        std::fs::write(temp.path().join("outside.xml"), "<x/>").unwrap();
        std::fs::write(root.join("META-INF").join("in.xml"), "<x/>").unwrap();

        let classpath = Classpath::new()
            .directory(&root)
            .embedded("../outside.xml", b"<x/>".as_slice());

        assert!(classpath.find("../outside.xml").is_none());
        assert!(classpath.find("META-INF/../../outside.xml").is_none());
        assert!(classpath.find("/META-INF/in.xml").is_some());
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_keeps_unreadable_dir_in_place() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::tempdir().unwrap();
        let locked = temp.path().join("META-INF").join("locked");
        std::fs::create_dir_all(&locked).unwrap();
        std::fs::write(temp.path().join("META-INF").join("a.xml"), "<x/>").unwrap();
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not apply to a privileged user.
        let readable = std::fs::read_dir(&locked).is_ok();
        let classpath = Classpath::new()
            .directory(temp.path())
            .embedded("META-INF/b.xml", b"<x/>".as_slice());
        let walked = classpath.walk("META-INF", "xml").unwrap();
        let strict = classpath.resources("META-INF", "xml");
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
        if readable {
            return;
        }

        assert_eq!(walked.iter().filter(|r| r.is_ok()).count(), 2);
        assert_eq!(walked.iter().filter(|r| r.is_err()).count(), 1);
        assert!(matches!(strict, Err(PluginError::Resolve { .. })));
    }
}
