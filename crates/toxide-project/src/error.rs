// ABOUTME: Error types for project directory resolution and workspace detection
// ABOUTME: Provides structured error handling with path context and proper error chains

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResolveError>;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("No active document to resolve a project directory from")]
    NoActiveDocument,

    #[error("Document path has no parent directory: {path}")]
    NoParentDirectory { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ResolveError {
    /// Create a no-parent-directory error
    pub fn no_parent_directory(path: PathBuf) -> Self {
        Self::NoParentDirectory { path }
    }

    /// True when the failure means no document had focus.
    ///
    /// Callers let this one propagate; the host surfaces it through its
    /// default command error path.
    pub fn is_no_active_document(&self) -> bool {
        matches!(self, Self::NoActiveDocument)
    }
}
