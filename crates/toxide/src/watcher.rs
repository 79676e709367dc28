// ABOUTME: Watches workspace folder roots for tox.ini changes
// ABOUTME: Converts notify events into created/changed/deleted updates over a tokio channel

use std::path::{Path, PathBuf};
use std::sync::Arc;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use toxide_host::TestTree;
use toxide_logging::{debug, error};

use crate::test_tree;

/// File watched at the root of each workspace folder.
pub const WATCHED_FILE_NAME: &str = "tox.ini";

/// A change to a watched tox.ini.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEvent {
    Created(PathBuf),
    Changed(PathBuf),
    Deleted(PathBuf),
}

/// Watches folder roots and reports tox.ini changes.
pub struct ToxIniWatcher {
    event_rx: mpsc::UnboundedReceiver<notify::Result<Event>>,
    roots: Vec<PathBuf>,
    // Keep the watcher alive for the lifetime of this struct
    _watcher: RecommendedWatcher,
}

impl ToxIniWatcher {
    /// Watch the root of each folder for tox.ini changes
    pub fn new(roots: &[PathBuf]) -> notify::Result<Self> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let mut watcher = notify::recommended_watcher(move |res| {
            if event_tx.send(res).is_err() {
                // Receiver side dropped, watcher is shutting down
            }
        })?;

        let mut watched_roots = Vec::new();
        for root in roots {
            watcher.watch(root, RecursiveMode::NonRecursive)?;
            watched_roots.push(root.clone());
            // Native backends may report resolved paths
            if let Ok(canonical) = std::fs::canonicalize(root) {
                if !watched_roots.contains(&canonical) {
                    watched_roots.push(canonical);
                }
            }
        }
        debug!(roots = ?watched_roots, "Watching for tox.ini changes");

        Ok(Self {
            event_rx,
            roots: watched_roots,
            _watcher: watcher,
        })
    }

    /// Next tox.ini change; `None` when the watcher has shut down
    pub async fn next_event(&mut self) -> Option<FileEvent> {
        while let Some(res) = self.event_rx.recv().await {
            match res {
                Ok(event) => {
                    if let Some(converted) = self.convert_event(&event) {
                        return Some(converted);
                    }
                }
                Err(err) => {
                    error!(error = %err, "File watcher error");
                }
            }
        }
        None
    }

    fn convert_event(&self, event: &Event) -> Option<FileEvent> {
        let path = event
            .paths
            .iter()
            .find(|path| self.is_watched(path))?
            .clone();

        let converted = match event.kind {
            EventKind::Create(_) => FileEvent::Created(path),
            EventKind::Remove(_) => FileEvent::Deleted(path),
            // Anything else still means the file was touched
            _ => FileEvent::Changed(path),
        };
        debug!(event = ?converted, "tox.ini change");
        Some(converted)
    }

    fn is_watched(&self, path: &Path) -> bool {
        if path.file_name().and_then(|name| name.to_str()) != Some(WATCHED_FILE_NAME) {
            return false;
        }
        match path.parent() {
            Some(parent) => self.roots.iter().any(|root| root == parent),
            None => false,
        }
    }
}

/// Apply watcher events to the test tree until the watcher shuts down
pub async fn drive(mut watcher: ToxIniWatcher, tree: Arc<dyn TestTree>) {
    while let Some(event) = watcher.next_event().await {
        match event {
            FileEvent::Created(path) | FileEvent::Changed(path) => {
                test_tree::upsert_file(tree.as_ref(), &path);
            }
            FileEvent::Deleted(path) => {
                test_tree::remove_file(tree.as_ref(), &path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind};
    use std::time::Duration;
    use tempfile::TempDir;
    use tokio::time::timeout;
    use toxide_host::MemoryHost;

    #[test]
    fn test_filters_to_watched_file_name_at_the_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();
        let watcher = ToxIniWatcher::new(std::slice::from_ref(&root)).unwrap();

        let hit = Event::new(EventKind::Create(CreateKind::File)).add_path(root.join("tox.ini"));
        assert!(matches!(
            watcher.convert_event(&hit),
            Some(FileEvent::Created(_))
        ));

        let wrong_name =
            Event::new(EventKind::Create(CreateKind::File)).add_path(root.join("setup.cfg"));
        assert!(watcher.convert_event(&wrong_name).is_none());

        let nested = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(root.join("sub").join("tox.ini"));
        assert!(watcher.convert_event(&nested).is_none());
    }

    #[test]
    fn test_unclassified_kinds_count_as_changes() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();
        let watcher = ToxIniWatcher::new(std::slice::from_ref(&root)).unwrap();

        let event = Event::new(EventKind::Any).add_path(root.join("tox.ini"));
        assert!(matches!(
            watcher.convert_event(&event),
            Some(FileEvent::Changed(_))
        ));
    }

    #[tokio::test]
    async fn test_reports_create_and_delete_of_watched_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();
        let mut watcher = ToxIniWatcher::new(std::slice::from_ref(&root)).unwrap();

        let target = root.join("tox.ini");
        std::fs::write(&target, "[tox]\nenvlist = py39\n").unwrap();

        let first = timeout(Duration::from_secs(10), watcher.next_event())
            .await
            .expect("no event for created file")
            .expect("watcher shut down");
        assert!(matches!(first, FileEvent::Created(_)));

        std::fs::remove_file(&target).unwrap();
        // Write events from the creation may still be queued
        let deleted = loop {
            let event = timeout(Duration::from_secs(10), watcher.next_event())
                .await
                .expect("no event for deleted file")
                .expect("watcher shut down");
            if let FileEvent::Deleted(path) = event {
                break path;
            }
        };
        assert_eq!(deleted.file_name().and_then(|name| name.to_str()), Some(WATCHED_FILE_NAME));
    }

    #[tokio::test]
    async fn test_events_feed_the_test_tree() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();
        let watcher = ToxIniWatcher::new(std::slice::from_ref(&root)).unwrap();

        let host = Arc::new(MemoryHost::new());
        let tree: Arc<dyn TestTree> = host.clone();
        tokio::spawn(drive(watcher, tree));

        std::fs::write(root.join("tox.ini"), "[tox]\n").unwrap();
        std::fs::write(root.join("unrelated.txt"), "ignored").unwrap();

        let mut registered = Vec::new();
        for _ in 0..100 {
            registered = host.items();
            if !registered.is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        assert_eq!(registered.len(), 1);
        assert_eq!(registered[0].label, "tox.ini");
        assert_eq!(registered[0].children.len(), 1);
    }
}
