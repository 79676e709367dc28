// ABOUTME: Capability traits that define abstract interfaces onto the host editor
// ABOUTME: These traits enable dependency inversion so core logic never touches editor state

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use crate::terminal::TerminalRegistry;
use crate::types::{Document, TestItem, WorkspaceFolder};

/// Active document access capabilities
pub trait DocumentAccess: Send + Sync {
    /// The document that currently has focus, if any
    fn active_document(&self) -> Option<Document>;
}

/// Workspace folder capabilities
pub trait WorkspaceFolders: Send + Sync {
    /// All folders currently open in the workspace
    fn folders(&self) -> Vec<WorkspaceFolder>;

    /// The folder containing `path`, preferring the most specific root
    fn folder_containing(&self, path: &Path) -> Option<WorkspaceFolder> {
        self.folders()
            .into_iter()
            .filter(|folder| folder.contains(path))
            .max_by_key(|folder| folder.root.components().count())
    }
}

/// Read access to the host's settings store
pub trait Settings: Send + Sync {
    /// The `cwd` setting: a path template that may contain
    /// `${workspaceFolder}` and `${fileWorkspaceFolder}` placeholders
    fn working_dir_template(&self) -> Option<String>;
}

/// User-visible notification capabilities
pub trait Notifier: Send + Sync {
    /// Show an error message without interrupting the session
    fn show_error(&self, message: &str);
}

/// Quick-pick selection capabilities
///
/// Picks suspend until the user answers; `None` means the pick was
/// dismissed without a choice.
#[async_trait]
pub trait Picker: Send + Sync {
    /// Offer `items` and resolve to the single chosen entry
    async fn pick_one(&self, items: &[String]) -> Option<String>;

    /// Offer `items` and resolve to every chosen entry, in pick order
    async fn pick_many(&self, items: &[String]) -> Option<Vec<String>>;
}

/// Test tree registration capabilities
pub trait TestTree: Send + Sync {
    /// Insert or replace the item with the same id
    fn upsert(&self, item: TestItem);

    /// Remove the item with this id, if present
    fn remove(&self, id: &str);

    /// Current items, in registration order
    fn items(&self) -> Vec<TestItem>;
}

/// Aggregated host collaborators handed to command handlers.
///
/// Everything is behind an `Arc` so the context can be cloned into
/// spawned tasks without tying command logic to a concrete host.
#[derive(Clone)]
pub struct HostContext {
    pub documents: Arc<dyn DocumentAccess>,
    pub workspace: Arc<dyn WorkspaceFolders>,
    pub settings: Arc<dyn Settings>,
    pub terminals: Arc<dyn TerminalRegistry>,
    pub picker: Arc<dyn Picker>,
    pub notifier: Arc<dyn Notifier>,
    pub test_tree: Arc<dyn TestTree>,
}
