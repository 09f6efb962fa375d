mod classpath;
mod directory;

use std::path::PathBuf;

pub use classpath::{Classpath, ClasspathEntry, EmbeddedResource, Resource, ResourceOrigin};

pub(crate) fn home_dir() -> Option<PathBuf> {
    directories::UserDirs::new().map(|d| d.home_dir().to_path_buf())
}
