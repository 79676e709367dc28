// ABOUTME: Lexical path normalization helpers used on resolved directories
// ABOUTME: Collapses dot segments and redundant separators without touching the filesystem

use std::path::{Component, Path, PathBuf};

/// Normalize a path lexically: fold `.` segments, resolve `..` against the
/// preceding component, and drop redundant separators.
///
/// Intended for absolute paths; `..` segments that would climb past the root
/// are dropped. The filesystem is never consulted, so symlinks are not
/// resolved and the path need not exist.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
            Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(part) => normalized.push(part),
        }
    }
    normalized
}
