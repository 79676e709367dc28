// ABOUTME: Marker-based workspace folder detection via ancestor traversal
// ABOUTME: Finds the nearest directory carrying a tox project marker file

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use toxide_logging::debug;

use crate::error::Result;

/// File names that identify a tox workspace folder. Presence is checked by
/// name only; contents are never read.
pub const DEFAULT_MARKERS: &[&str] = &["tox.ini", "setup.cfg", "pyproject.toml"];

/// Maximum number of ancestor directories probed during detection.
pub const DEFAULT_MAX_DEPTH: usize = 20;

/// Walk upward from `start` and return the nearest ancestor directory that
/// contains one of the `markers`.
///
/// `start` may name a file or a directory and does not have to exist; each
/// candidate marker is probed with a metadata call, nothing else. Returns
/// `None` when the walk exhausts `max_depth` ancestors without a hit.
pub async fn find_workspace_folder(
    start: &Path,
    markers: &[String],
    max_depth: usize,
) -> Result<Option<PathBuf>> {
    let mut visited_paths = HashSet::new();

    for ancestor in start.ancestors().take(max_depth) {
        // Prevent re-probing under pathological inputs
        if !visited_paths.insert(ancestor.to_path_buf()) {
            break;
        }

        for marker in markers {
            let candidate = ancestor.join(marker);

            match tokio::fs::metadata(&candidate).await {
                Ok(metadata) if metadata.is_file() => {
                    debug!(
                        marker = %marker,
                        folder = %ancestor.display(),
                        "Found workspace marker file"
                    );
                    return Ok(Some(ancestor.to_path_buf()));
                }
                _ => {}
            }
        }
    }

    Ok(None)
}

/// Default marker list as owned strings, for configuration defaults.
pub fn default_markers() -> Vec<String> {
    DEFAULT_MARKERS.iter().map(|m| m.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_finds_marker_in_ancestor() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("src").join("pkg");
        tokio::fs::create_dir_all(&nested).await.unwrap();
        tokio::fs::write(temp_dir.path().join("tox.ini"), "[tox]\n")
            .await
            .unwrap();

        let file = nested.join("app.py");
        tokio::fs::write(&file, "").await.unwrap();

        let found = find_workspace_folder(&file, &default_markers(), DEFAULT_MAX_DEPTH)
            .await
            .unwrap();
        assert_eq!(found, Some(temp_dir.path().to_path_buf()));
    }

    #[tokio::test]
    async fn test_nearest_marker_wins() {
        let temp_dir = TempDir::new().unwrap();
        let inner = temp_dir.path().join("inner");
        tokio::fs::create_dir_all(&inner).await.unwrap();
        tokio::fs::write(temp_dir.path().join("pyproject.toml"), "")
            .await
            .unwrap();
        tokio::fs::write(inner.join("tox.ini"), "[tox]\n")
            .await
            .unwrap();

        let found = find_workspace_folder(
            &inner.join("test_app.py"),
            &default_markers(),
            DEFAULT_MAX_DEPTH,
        )
        .await
        .unwrap();
        assert_eq!(found, Some(inner));
    }

    #[tokio::test]
    async fn test_no_marker_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("orphan.py");
        tokio::fs::write(&file, "").await.unwrap();

        // Cap the walk inside the temp dir so files on the host system
        // cannot leak into the result
        let found = find_workspace_folder(&file, &default_markers(), 2)
            .await
            .unwrap();
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn test_marker_directory_does_not_count() {
        let temp_dir = TempDir::new().unwrap();
        tokio::fs::create_dir(temp_dir.path().join("tox.ini"))
            .await
            .unwrap();

        let found = find_workspace_folder(&temp_dir.path().join("app.py"), &default_markers(), 2)
            .await
            .unwrap();
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn test_depth_cap_limits_the_walk() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b").join("c");
        tokio::fs::create_dir_all(&nested).await.unwrap();
        tokio::fs::write(temp_dir.path().join("setup.cfg"), "")
            .await
            .unwrap();

        // The marker sits four levels above the probe file; a depth of two
        // never reaches it
        let found = find_workspace_folder(&nested.join("x.py"), &default_markers(), 2)
            .await
            .unwrap();
        assert_eq!(found, None);
    }
}
