// ABOUTME: Terminal session traits and the name-keyed session provider
// ABOUTME: Reuses an open session by exact name match before asking the host for a new one

use std::path::{Path, PathBuf};
use std::sync::Arc;

use toxide_logging::debug;

use crate::error::Result;

/// Name given to sessions this integration opens when the caller does not
/// supply one.
pub const DEFAULT_TERMINAL_NAME: &str = "tox";

/// An open terminal session owned by the host.
pub trait TerminalHandle: Send + Sync {
    /// The session's display name
    fn name(&self) -> String;

    /// Working directory the session was created with
    fn working_dir(&self) -> PathBuf;

    /// Bring the session into view
    fn show(&self);

    /// Type `text` into the session as a complete line
    fn send_text(&self, text: &str) -> Result<()>;
}

/// The host's collection of terminal sessions.
pub trait TerminalRegistry: Send + Sync {
    /// All open sessions, in the host's order
    fn terminals(&self) -> Vec<Arc<dyn TerminalHandle>>;

    /// Open a new session named `name` rooted at `dir`
    fn create(&self, name: &str, dir: &Path) -> Result<Arc<dyn TerminalHandle>>;
}

/// Find a session by name, creating one when none matches.
///
/// The scan is in registry order and the first exact name match wins. A
/// matching session is reused as-is; its working directory is not compared
/// against `dir` and never changed. Sessions are only ever added here, never
/// closed; lifetime stays with the host.
pub fn get_or_create(
    registry: &dyn TerminalRegistry,
    dir: &Path,
    name: &str,
) -> Result<Arc<dyn TerminalHandle>> {
    for terminal in registry.terminals() {
        if terminal.name() == name {
            debug!(terminal_name = %name, "Reusing existing terminal session");
            return Ok(terminal);
        }
    }

    debug!(
        terminal_name = %name,
        working_dir = %dir.display(),
        "Opening new terminal session"
    );
    registry.create(name, dir)
}
