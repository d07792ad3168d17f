use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::encoder::SecretEncoder;
use crate::errors::{ClaspSecretsError, Result};

/// Project-level configuration, loaded from `.clasp-secrets.toml`.
///
/// Every field has a default so the tool works without any config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// How credentials are laid out in the secret store.
    #[serde(default)]
    pub encoding: SecretEncoder,

    /// The GitHub CLI binary to invoke.
    #[serde(default = "default_gh_path")]
    pub gh_path: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_gh_path() -> String {
    "gh".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            encoding: SecretEncoder::default(),
            gh_path: default_gh_path(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    pub const FILE_NAME: &'static str = ".clasp-secrets.toml";

    /// Load settings from `<project_dir>/.clasp-secrets.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            ClaspSecretsError::ConfigError(format!(
                "Failed to parse {}: {e}",
                config_path.display()
            ))
        })?;

        tracing::debug!(path = %config_path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Apply command-line overrides on top of the file values.
    pub fn with_overrides(mut self, encoding: Option<SecretEncoder>, gh_path: Option<&str>) -> Self {
        if let Some(encoding) = encoding {
            self.encoding = encoding;
        }
        if let Some(gh) = gh_path {
            self.gh_path = gh.to_string();
        }
        self
    }
}

// ── Tests ────────────────────────────────────────────────────────────
