// ABOUTME: toxide.toml loading and validation for the terminal front-end
// ABOUTME: Carries the cwd override template and the workspace marker file names

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use toxide_logging::{info, warn};
use toxide_project::default_markers;

/// File name looked up in the workspace folder and the user config directory.
pub const CONFIG_FILE_NAME: &str = "toxide.toml";

/// Settings read from `toxide.toml`.
///
/// Unknown keys are tolerated; a missing file yields the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Working-directory override template. Supports the
    /// `${workspaceFolder}` and `${fileWorkspaceFolder}` placeholders.
    #[serde(default)]
    pub cwd: Option<String>,

    /// File names whose presence marks a workspace folder root. Matched by
    /// name only; the files are never opened.
    #[serde(default = "default_markers")]
    pub markers: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cwd: None,
            markers: default_markers(),
        }
    }
}

impl Config {
    /// Load configuration, preferring an explicit path over discovery.
    ///
    /// Discovery checks the workspace folder first, then the user config
    /// directory. No file found means defaults.
    pub fn load(explicit: Option<&Path>, workspace: Option<&Path>) -> anyhow::Result<Config> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => discover_config_path(workspace),
        };

        let Some(path) = path else {
            info!("No configuration file found, using defaults");
            return Ok(Config::default());
        };

        Self::load_file(&path)
    }

    /// Load and validate a specific configuration file
    pub fn load_file(path: &Path) -> anyhow::Result<Config> {
        info!(
            config_path = %path.display(),
            config_exists = path.exists(),
            "Loading configuration"
        );

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let mut config: Config = toml::from_str(&text)
            .with_context(|| format!("parse config file {}", path.display()))?;

        if let Err(validation_error) = config.validate() {
            toxide_logging::error!(
                config_path = %path.display(),
                error = %validation_error,
                "Invalid configuration - using sanitized values"
            );
            config = config.sanitized();
        }

        Ok(config)
    }

    /// Validate the configuration values
    pub fn validate(&self) -> Result<(), String> {
        if let Some(template) = &self.cwd {
            if template.trim().is_empty() {
                return Err("cwd template is empty".to_string());
            }
        }

        if self.markers.is_empty() {
            return Err("markers list is empty".to_string());
        }
        for marker in &self.markers {
            if marker.is_empty() || marker.contains(['/', '\\']) {
                return Err(format!("marker '{marker}' is not a bare file name"));
            }
        }

        Ok(())
    }

    /// Create a sanitized copy with invalid values replaced
    pub fn sanitized(&self) -> Config {
        let mut config = self.clone();

        if let Some(template) = &config.cwd {
            if template.trim().is_empty() {
                warn!("Ignoring empty cwd template");
                config.cwd = None;
            }
        }

        config.markers.retain(|marker| {
            let usable = !marker.is_empty() && !marker.contains(['/', '\\']);
            if !usable {
                warn!(marker = %marker, "Ignoring marker that is not a bare file name");
            }
            usable
        });
        if config.markers.is_empty() {
            warn!("No usable markers configured, falling back to defaults");
            config.markers = default_markers();
        }

        config
    }
}

fn discover_config_path(workspace: Option<&Path>) -> Option<PathBuf> {
    if let Some(root) = workspace {
        let candidate = root.join(CONFIG_FILE_NAME);
        if candidate.exists() {
            return Some(candidate);
        }
    }

    dirs::config_dir()
        .map(|dir| dir.join("toxide").join(CONFIG_FILE_NAME))
        .filter(|candidate| candidate.exists())
}

/// Example toxide.toml configuration:
/// ```toml
/// cwd = "${workspaceFolder}/python"
/// markers = ["tox.ini", "setup.cfg", "pyproject.toml"]
/// ```
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_file_missing() {
        let temp_dir = TempDir::new().unwrap();

        let config = Config::load(None, Some(temp_dir.path())).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.markers, vec!["tox.ini", "setup.cfg", "pyproject.toml"]);
        assert!(config.cwd.is_none());
    }

    #[test]
    fn test_parses_workspace_config() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "cwd = \"${workspaceFolder}/sub\"\nmarkers = [\"tox.ini\"]\n",
        )
        .unwrap();

        let config = Config::load(None, Some(temp_dir.path())).unwrap();

        assert_eq!(config.cwd.as_deref(), Some("${workspaceFolder}/sub"));
        assert_eq!(config.markers, vec!["tox.ini"]);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: Config = toml::from_str("cwd = \"build\"\n").unwrap();

        assert_eq!(config.cwd.as_deref(), Some("build"));
        assert_eq!(config.markers, default_markers());
    }

    #[test]
    fn test_unknown_keys_are_tolerated() {
        let config: Config = toml::from_str("future_key = true\n").unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nowhere.toml");

        assert!(Config::load(Some(&missing), None).is_err());
    }

    #[test]
    fn test_sanitize_drops_bad_markers_and_empty_template() {
        let config = Config {
            cwd: Some("   ".to_string()),
            markers: vec!["tox.ini".to_string(), "sub/tox.ini".to_string()],
        };
        assert!(config.validate().is_err());

        let sanitized = config.sanitized();
        assert!(sanitized.cwd.is_none());
        assert_eq!(sanitized.markers, vec!["tox.ini"]);
        assert!(sanitized.validate().is_ok());
    }

    #[test]
    fn test_sanitize_restores_default_markers_when_none_usable() {
        let config = Config {
            cwd: None,
            markers: vec!["a/b".to_string()],
        };

        assert_eq!(config.sanitized().markers, default_markers());
    }

    #[test]
    fn test_invalid_values_are_sanitized_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "cwd = \"\"\nmarkers = []\n").unwrap();

        let config = Config::load_file(&path).unwrap();

        assert!(config.cwd.is_none());
        assert_eq!(config.markers, default_markers());
    }
}
