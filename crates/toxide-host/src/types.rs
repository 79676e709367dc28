// ABOUTME: Plain data types shared across host collaborator traits
// ABOUTME: Documents, workspace folders, and test tree items as the host reports them

use std::path::{Path, PathBuf};

/// A document the host editor currently has open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// Absolute path of the document on disk
    pub path: PathBuf,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Directory containing the document, when the path has one
    pub fn parent_dir(&self) -> Option<&Path> {
        self.path.parent()
    }
}

/// A root folder of the host's workspace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkspaceFolder {
    /// Absolute path of the folder root
    pub root: PathBuf,
    /// Display name, typically the last path component
    pub name: String,
}

impl WorkspaceFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.to_string_lossy().into_owned());
        Self { root, name }
    }

    /// True when `path` lives under this folder's root
    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.root)
    }
}

/// An entry in the host's test tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestItem {
    /// Stable identifier, unique within the tree
    pub id: String,
    /// Label shown in the tree UI
    pub label: String,
    /// File the item was derived from
    pub path: PathBuf,
    /// Child items, if any
    pub children: Vec<TestItem>,
}

impl TestItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            path: path.into(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: TestItem) -> Self {
        self.children.push(child);
        self
    }
}
