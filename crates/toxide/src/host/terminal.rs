// ABOUTME: PTY-backed terminal sessions implementing the host terminal traits
// ABOUTME: Each session spawns the default shell and types command lines into it

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use portable_pty::{CommandBuilder, PtySize, native_pty_system};
use tokio::sync::mpsc;
use toxide_host::{HostError, Result, TerminalHandle, TerminalRegistry};
use toxide_logging::debug;

/// One PTY-backed shell session.
///
/// A blocking task pumps PTY output into a channel; `take_output` hands the
/// receiving end to whoever streams or drains the session.
pub struct PtyTerminal {
    name: String,
    working_dir: PathBuf,
    writer: Mutex<Box<dyn Write + Send>>,
    output: Mutex<Option<mpsc::Receiver<Vec<u8>>>>,
    _child: Mutex<Box<dyn portable_pty::Child + Send>>,
    _master: Mutex<Box<dyn portable_pty::MasterPty + Send>>,
}

impl std::fmt::Debug for PtyTerminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PtyTerminal")
            .field("name", &self.name)
            .field("working_dir", &self.working_dir)
            .finish()
    }
}

impl PtyTerminal {
    /// Spawn the default shell in `dir` on a fresh PTY.
    ///
    /// Must run inside a tokio runtime; the read loop is a blocking task.
    fn spawn(name: &str, dir: &Path) -> Result<Self> {
        let pty_system = native_pty_system();
        let size = PtySize {
            rows: 24,
            cols: 80,
            pixel_width: 0,
            pixel_height: 0,
        };
        let pair = pty_system
            .openpty(size)
            .map_err(|e| HostError::terminal_creation(name, e.to_string()))?;

        let shell = default_shell();
        let mut cmd = CommandBuilder::new(&shell);
        cmd.cwd(dir);

        let child = pair
            .slave
            .spawn_command(cmd)
            .map_err(|e| HostError::terminal_creation(name, e.to_string()))?;

        let mut reader = pair
            .master
            .try_clone_reader()
            .map_err(|e| HostError::terminal_creation(name, e.to_string()))?;
        let writer = pair
            .master
            .take_writer()
            .map_err(|e| HostError::terminal_creation(name, e.to_string()))?;

        let (output_tx, output_rx) = mpsc::channel::<Vec<u8>>(1024);
        tokio::task::spawn_blocking(move || {
            let mut buf = vec![0u8; 8192];
            loop {
                match reader.read(&mut buf) {
                    Ok(0) => break, // EOF
                    Ok(n) => {
                        if output_tx.blocking_send(buf[..n].to_vec()).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
        });

        debug!(
            terminal_name = %name,
            working_dir = %dir.display(),
            shell = %shell,
            "Spawned PTY terminal session"
        );

        Ok(Self {
            name: name.to_string(),
            working_dir: dir.to_path_buf(),
            writer: Mutex::new(writer),
            output: Mutex::new(Some(output_rx)),
            _child: Mutex::new(child),
            _master: Mutex::new(pair.master),
        })
    }

    /// Take the session's output stream; later calls return `None`.
    ///
    /// The stream ends when the shell exits and the PTY reports EOF.
    pub fn take_output(&self) -> Option<mpsc::Receiver<Vec<u8>>> {
        self.output.lock().take()
    }
}

impl TerminalHandle for PtyTerminal {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn working_dir(&self) -> PathBuf {
        self.working_dir.clone()
    }

    fn show(&self) {
        // A console session has no window to raise; its output already
        // streams to the launching terminal
        debug!(terminal_name = %self.name, "Terminal show requested");
    }

    fn send_text(&self, text: &str) -> Result<()> {
        let mut writer = self.writer.lock();
        writer
            .write_all(text.as_bytes())
            .and_then(|_| writer.write_all(b"\n"))
            .and_then(|_| writer.flush())
            .map_err(|e| HostError::terminal_write(&self.name, e.to_string()))
    }
}

/// Host terminal registry backed by PTY sessions.
#[derive(Default)]
pub struct PtyTerminalRegistry {
    sessions: Mutex<Vec<Arc<PtyTerminal>>>,
}

impl PtyTerminalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concrete session handles, for shutdown draining
    pub fn sessions(&self) -> Vec<Arc<PtyTerminal>> {
        self.sessions.lock().clone()
    }
}

impl TerminalRegistry for PtyTerminalRegistry {
    fn terminals(&self) -> Vec<Arc<dyn TerminalHandle>> {
        self.sessions
            .lock()
            .iter()
            .map(|s| s.clone() as Arc<dyn TerminalHandle>)
            .collect()
    }

    fn create(&self, name: &str, dir: &Path) -> Result<Arc<dyn TerminalHandle>> {
        let session = Arc::new(PtyTerminal::spawn(name, dir)?);
        self.sessions.lock().push(session.clone());
        Ok(session)
    }
}

fn default_shell() -> String {
    #[cfg(windows)]
    {
        std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
    }
    #[cfg(not(windows))]
    {
        std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[cfg(unix)]
    #[tokio::test]
    async fn test_session_runs_commands_and_reports_output() {
        let temp_dir = TempDir::new().unwrap();
        let registry = PtyTerminalRegistry::new();

        let handle = registry.create("tox", temp_dir.path()).unwrap();
        assert_eq!(handle.name(), "tox");
        assert_eq!(handle.working_dir(), temp_dir.path());

        handle.send_text("echo toxide-ready").unwrap();
        handle.send_text("exit").unwrap();

        let sessions = registry.sessions();
        assert_eq!(sessions.len(), 1);
        let mut output_rx = sessions[0].take_output().expect("output stream");
        // Second take is empty; the stream moved out above
        assert!(sessions[0].take_output().is_none());

        let mut collected = Vec::new();
        while let Some(chunk) = output_rx.recv().await {
            collected.extend_from_slice(&chunk);
        }
        let output = String::from_utf8_lossy(&collected);
        assert!(output.contains("toxide-ready"), "output was: {output}");
    }
}
