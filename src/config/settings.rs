use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ViewSecretError};

/// User-level configuration, loaded from `config.toml`.
///
/// Every field has a sensible default so the plugin works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// The kubectl binary to run (name on PATH or absolute path).
    #[serde(default = "default_kubectl")]
    pub kubectl: String,

    /// Output format used when `--output` is not given.
    #[serde(default = "default_output")]
    pub output: String,

    /// Silence informational messages by default.
    #[serde(default)]
    pub quiet: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_kubectl() -> String {
    "kubectl".to_string()
}

fn default_output() -> String {
    "text".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            kubectl: default_kubectl(),
            output: default_output(),
            quiet: false,
        }
    }
}

impl Settings {
    /// Name of the directory under the user config dir.
    const DIR_NAME: &'static str = "kubectl-view-secret";

    /// Name of the config file inside that directory.
    const FILE_NAME: &'static str = "config.toml";

    /// Default config location, e.g. `~/.config/kubectl-view-secret/config.toml`.
    ///
    /// `None` when the platform has no user config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::DIR_NAME).join(Self::FILE_NAME))
    }

    /// Load settings from `path`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            ViewSecretError::Config(format!("Failed to parse {}: {e}", path.display()))
        })?;

        Ok(settings)
    }

    /// Load from an explicit path, or from the default location.
    pub fn load_from(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => match Self::default_path() {
                Some(path) => Self::load(&path),
                None => Ok(Self::default()),
            },
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
