//! Upward search for the closest React Native project root

use crate::manifest;
use std::path::{Component, Path, PathBuf};

/// Check whether `dir` holds a readable `package.json` that declares react-native
fn is_project_root(dir: &Path) -> bool {
    manifest::exists(dir) && manifest::try_read(dir).is_some_and(|m| m.is_react_native())
}

/// Make `path` absolute and drop `.`/`..` components lexically.
///
/// Symlinks are not resolved; `..` at the filesystem root stays at the root.
pub fn normalize(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Walk from `start` towards the filesystem root and return the first
/// directory that qualifies as a React Native project.
///
/// The closest ancestor wins. Malformed manifests along the way are skipped.
/// The filesystem root itself is never tested.
pub fn find_root(start: &Path) -> Option<PathBuf> {
    let mut cursor = normalize(start);

    while let Some(parent) = cursor.parent() {
        if is_project_root(&cursor) {
            return Some(cursor);
        }
        cursor = parent.to_path_buf();
    }

    None
}

/// Search upward from the current working directory
pub fn find_root_from_cwd() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_root(&cwd)
}
