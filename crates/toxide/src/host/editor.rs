// ABOUTME: Editor-state adapters for a single-invocation command line host
// ABOUTME: The active document and workspace folders come from startup arguments

use std::path::PathBuf;

use toxide_host::{Document, DocumentAccess, Settings, WorkspaceFolder, WorkspaceFolders};

/// Active document taken from the FILE argument.
///
/// Without an argument the host reports no focused document, which the
/// resolver turns into its no-active-document failure.
pub struct CliDocuments {
    file: Option<PathBuf>,
}

impl CliDocuments {
    pub fn new(file: Option<PathBuf>) -> Self {
        Self { file }
    }
}

impl DocumentAccess for CliDocuments {
    fn active_document(&self) -> Option<Document> {
        self.file.clone().map(Document::new)
    }
}

/// Workspace folders detected once at startup.
pub struct StaticFolders {
    folders: Vec<WorkspaceFolder>,
}

impl StaticFolders {
    pub fn new(folders: Vec<WorkspaceFolder>) -> Self {
        Self { folders }
    }
}

impl WorkspaceFolders for StaticFolders {
    fn folders(&self) -> Vec<WorkspaceFolder> {
        self.folders.clone()
    }
}

/// Settings backed by the loaded configuration plus command line overrides.
pub struct CliSettings {
    cwd_template: Option<String>,
}

impl CliSettings {
    pub fn new(cwd_template: Option<String>) -> Self {
        Self { cwd_template }
    }
}

impl Settings for CliSettings {
    fn working_dir_template(&self) -> Option<String> {
        self.cwd_template.clone()
    }
}
