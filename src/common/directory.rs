use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::plugins::PluginError;

/// Lists files below `root/dir` whose name ends with `.extension`, sorted.
///
/// A missing `root/dir` yields an empty list. A subdirectory that cannot be
/// read is returned in place as a [`PluginError::Resolve`] entry.
pub fn find_files(
    root: &Path,
    dir: &str,
    extension: &str,
) -> Result<Vec<Result<PathBuf, PluginError>>, PluginError> {
    let base = root.join(dir);
    if !base.is_dir() {
        return Ok(Vec::new());
    }

    let pattern = format!(
        "{}/**/*.{}",
        Pattern::escape(&base.to_string_lossy()),
        Pattern::escape(extension)
    );
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let mut files = Vec::new();
    for entry in glob::glob_with(&pattern, options)? {
        match entry {
            Ok(path) if path.is_file() => files.push(Ok(path)),
            Ok(_) => {}
            Err(e) => {
                let name = e.path().display().to_string();
                files.push(Err(PluginError::Resolve {
                    name,
                    cause: e.into_error(),
                }));
            }
        }
    }
    files.sort_by(|a, b| sort_key(a).cmp(sort_key(b)));
    Ok(files)
}

fn sort_key(entry: &Result<PathBuf, PluginError>) -> &Path {
    match entry {
        Ok(path) => path,
        Err(e) => Path::new(e.source_name().unwrap_or_default()),
    }
}

/// Relative resource name of `path` under `root`, always `/`-separated.
pub fn relative_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

pub fn has_extension(name: &str, extension: &str) -> bool {
    name.strip_suffix(extension)
        .is_some_and(|stem| stem.ends_with('.'))
}
