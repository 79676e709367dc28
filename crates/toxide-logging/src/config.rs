// ABOUTME: Logging configuration: baseline level, module overrides, output targets
// ABOUTME: Environment variables refine the defaults before the subscriber is built

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use tracing::Level;

/// `tracing::Level` with serde and string conversions attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLevel(pub Level);

impl std::str::FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let level = match s.to_ascii_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" | "warning" => Level::WARN,
            "error" => Level::ERROR,
            other => anyhow::bail!(
                "unknown log level '{other}', expected trace, debug, info, warn or error"
            ),
        };
        Ok(LogLevel(level))
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self.0 {
            Level::TRACE => "trace",
            Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
        };
        f.write_str(name)
    }
}

impl Serialize for LogLevel {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> std::result::Result<LogLevel, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        LogLevel(level)
    }
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        log_level.0
    }
}

/// What the subscriber records and where the records go.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Baseline level for everything without a more specific directive
    pub level: LogLevel,

    /// Per-module levels layered over the baseline
    pub module_levels: HashMap<String, LogLevel>,

    /// Mirror records to stderr
    pub console: bool,

    /// Write file records as JSON instead of plain text
    pub json: bool,

    /// Log file destination; `None` disables file output
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel(Level::INFO),
            module_levels: HashMap::new(),
            console: true,
            json: false,
            file: Some(default_log_path()),
        }
    }
}

impl LoggingConfig {
    /// Defaults refined by the `TOXIDE_LOG*` and `RUST_LOG` variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Fold environment overrides into this configuration.
    ///
    /// `TOXIDE_LOG` wins over `RUST_LOG`; both take the usual comma
    /// separated directive syntax. The remaining variables toggle output
    /// targets by their mere presence.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(spec) = env::var("TOXIDE_LOG") {
            self.apply_directives(&spec).context("TOXIDE_LOG")?;
        } else if let Ok(spec) = env::var("RUST_LOG") {
            self.apply_directives(&spec).context("RUST_LOG")?;
        }

        if env::var_os("TOXIDE_LOG_JSON").is_some() {
            self.json = true;
        }
        if env::var_os("TOXIDE_LOG_NO_CONSOLE").is_some() {
            self.console = false;
        }
        if env::var_os("TOXIDE_LOG_NO_FILE").is_some() {
            self.file = None;
        }

        Ok(())
    }

    /// Apply a directive list such as `info,toxide_runner=debug`.
    ///
    /// Bare levels move the baseline; `module=level` pairs land in
    /// `module_levels`. Empty entries are skipped.
    pub fn apply_directives(&mut self, spec: &str) -> Result<()> {
        for directive in spec.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            match directive.split_once('=') {
                Some((module, level)) => {
                    let level: LogLevel = level
                        .parse()
                        .with_context(|| format!("directive '{directive}'"))?;
                    self.module_levels.insert(module.to_string(), level);
                }
                None => {
                    self.level = directive
                        .parse()
                        .with_context(|| format!("directive '{directive}'"))?;
                }
            }
        }
        Ok(())
    }
}

fn default_log_path() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join("toxide").join("toxide.log"),
        None => PathBuf::from("toxide.log"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoggingConfig::default();

        assert_eq!(config.level, LogLevel(Level::INFO));
        assert!(config.module_levels.is_empty());
        assert!(config.console);
        assert!(!config.json);
        let file = config.file.expect("default file target");
        assert!(file.to_string_lossy().contains("toxide.log"));
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!("trace".parse::<LogLevel>().unwrap(), LogLevel(Level::TRACE));
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel(Level::DEBUG));
        assert_eq!("Info".parse::<LogLevel>().unwrap(), LogLevel(Level::INFO));
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel(Level::WARN));
        assert_eq!("error".parse::<LogLevel>().unwrap(), LogLevel(Level::ERROR));

        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_level_display_round_trips() {
        for name in ["trace", "debug", "info", "warn", "error"] {
            let level: LogLevel = name.parse().unwrap();
            assert_eq!(level.to_string(), name);
        }
    }

    #[test]
    fn test_directives_move_baseline_and_modules() {
        let mut config = LoggingConfig::default();
        config
            .apply_directives("warn, toxide_project=debug,toxide_runner=trace")
            .unwrap();

        assert_eq!(config.level, LogLevel(Level::WARN));
        assert_eq!(
            config.module_levels.get("toxide_project"),
            Some(&LogLevel(Level::DEBUG))
        );
        assert_eq!(
            config.module_levels.get("toxide_runner"),
            Some(&LogLevel(Level::TRACE))
        );
    }

    #[test]
    fn test_bad_directive_is_an_error() {
        let mut config = LoggingConfig::default();

        assert!(config.apply_directives("toxide=shouting").is_err());
        assert!(config.apply_directives("nonsense").is_err());
    }
}
