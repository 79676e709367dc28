// ABOUTME: Error types for tox subprocess invocation
// ABOUTME: Distinguishes a missing executable from a spawned run that failed

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RunnerError>;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("'{program}' executable not found on PATH")]
    ProgramNotFound { program: String },

    #[error("Failed to run '{program} -a' in {}: {source}", dir.display())]
    Spawn {
        program: String,
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program} -a' failed in {} ({status}): {stderr}", dir.display())]
    NonZeroExit {
        program: String,
        dir: PathBuf,
        status: ExitStatus,
        stderr: String,
    },
}

impl RunnerError {
    /// Create a program-not-found error
    pub fn program_not_found<S: Into<String>>(program: S) -> Self {
        Self::ProgramNotFound {
            program: program.into(),
        }
    }

    /// Create a spawn error with directory context
    pub fn spawn<S: Into<String>>(program: S, dir: PathBuf, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            dir,
            source,
        }
    }

    /// Create a non-zero-exit error carrying captured stderr
    pub fn non_zero_exit<S: Into<String>>(
        program: S,
        dir: PathBuf,
        status: ExitStatus,
        stderr: String,
    ) -> Self {
        Self::NonZeroExit {
            program: program.into(),
            dir,
            status,
            stderr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_program() {
        let err = RunnerError::program_not_found("tox");
        assert!(err.to_string().contains("tox"));

        let err = RunnerError::spawn(
            "tox",
            PathBuf::from("/ws/proj"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/ws/proj"));
    }
}
