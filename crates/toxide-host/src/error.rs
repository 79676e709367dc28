// ABOUTME: Error types for host collaborator operations
// ABOUTME: Covers terminal session failures surfaced through host-owned handles

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HostError>;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to create terminal session '{name}': {reason}")]
    TerminalCreation { name: String, reason: String },

    #[error("Terminal session '{name}' rejected input: {reason}")]
    TerminalWrite { name: String, reason: String },
}

impl HostError {
    /// Create a terminal creation error
    pub fn terminal_creation<S: Into<String>, R: Into<String>>(name: S, reason: R) -> Self {
        Self::TerminalCreation {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a terminal write error
    pub fn terminal_write<S: Into<String>, R: Into<String>>(name: S, reason: R) -> Self {
        Self::TerminalWrite {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
