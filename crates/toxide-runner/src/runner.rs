// ABOUTME: The tox runner: environment listing via subprocess and run-command text
// ABOUTME: Spawns `tox -a` directly in the resolved directory with no shell in between

use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

use toxide_logging::{debug, warn};

use crate::envs::{EnvName, parse_env_list};
use crate::error::{Result, RunnerError};

/// Program name used when none is configured.
pub const DEFAULT_PROGRAM: &str = "tox";

/// Source of tox environment listings.
#[async_trait]
pub trait EnvLister: Send + Sync {
    /// List the environments of the tox project rooted at `dir`
    async fn list_envs(&self, dir: &Path) -> Result<Vec<EnvName>>;
}

/// Invokes the tox executable.
///
/// The program defaults to `tox` and is resolved through PATH at spawn
/// time. Pointing it elsewhere changes both the listing subprocess and the
/// text of the run command sent to the terminal.
#[derive(Clone, Debug)]
pub struct ToxRunner {
    program: String,
}

impl Default for ToxRunner {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
        }
    }
}

impl ToxRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// The line typed into the terminal to run `envs`.
    ///
    /// One environment gives `tox -e py39`; several give
    /// `tox -e py39,lint`. Callers pass at least one name.
    pub fn run_command_text(&self, envs: &[EnvName]) -> String {
        let names = envs
            .iter()
            .map(EnvName::as_str)
            .collect::<Vec<_>>()
            .join(",");
        format!("{} -e {}", self.program, names)
    }
}

#[async_trait]
impl EnvLister for ToxRunner {
    async fn list_envs(&self, dir: &Path) -> Result<Vec<EnvName>> {
        debug!(
            program = %self.program,
            dir = %dir.display(),
            "Listing tox environments"
        );

        let output = Command::new(&self.program)
            .arg("-a")
            .current_dir(dir)
            .output()
            .await
            .map_err(|source| {
                if source.kind() == std::io::ErrorKind::NotFound
                    && which::which(&self.program).is_err()
                {
                    return RunnerError::program_not_found(&self.program);
                }
                RunnerError::spawn(&self.program, dir.to_path_buf(), source)
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(
                program = %self.program,
                dir = %dir.display(),
                status = %output.status,
                "tox environment listing failed"
            );
            return Err(RunnerError::non_zero_exit(
                &self.program,
                dir.to_path_buf(),
                output.status,
                stderr,
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let envs = parse_env_list(&stdout);
        debug!(count = envs.len(), "Parsed tox environment listing");
        Ok(envs)
    }
}
