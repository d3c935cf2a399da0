//! Config Locator - find the dashboard config file for the CLI
//!
//! Lookup order: `--config` argument, then `DOCSIGHT_CONFIG`, then
//! `config.yaml` in the user's config directory (e.g. ~/.config/docsight).

use std::path::{Path, PathBuf};

/// Environment variable naming a config file
pub const CONFIG_ENV_VAR: &str = "DOCSIGHT_CONFIG";

const CONFIG_FILE_NAME: &str = "config.yaml";

/// Where a resolved config path came from, for the startup banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Argument(PathBuf),
    Environment(PathBuf),
    UserConfigDir(PathBuf),
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Argument(p) | ConfigSource::Environment(p) | ConfigSource::UserConfigDir(p) => {
                Some(p)
            }
            ConfigSource::Defaults => None,
        }
    }
}

pub struct ConfigLocator {
    /// Base directory for docsight config (e.g., ~/.config/docsight)
    config_dir: Option<PathBuf>,
}

impl ConfigLocator {
    /// Locator over the platform config directory
    pub fn new() -> Self {
        Self {
            config_dir: dirs::config_dir().map(|base| base.join("docsight")),
        }
    }

    /// Locator over an explicit config directory
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: Some(config_dir.into()),
        }
    }

    pub fn config_dir(&self) -> Option<&Path> {
        self.config_dir.as_deref()
    }

    /// `config.yaml` inside the config directory, whether or not it exists
    pub fn default_config_path(&self) -> Option<PathBuf> {
        self.config_dir.as_ref().map(|dir| dir.join(CONFIG_FILE_NAME))
    }

    /// Resolve using the process environment
    pub fn resolve(&self, explicit: Option<&str>) -> ConfigSource {
        self.resolve_with_env(explicit, std::env::var(CONFIG_ENV_VAR).ok())
    }

    /// An explicit path is returned even if missing so loading can warn
    /// about it; the user config file is only used when present.
    pub fn resolve_with_env(&self, explicit: Option<&str>, env_value: Option<String>) -> ConfigSource {
        if let Some(path) = explicit {
            return ConfigSource::Argument(PathBuf::from(path));
        }

        if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
            return ConfigSource::Environment(PathBuf::from(value));
        }

        match self.default_config_path() {
            Some(path) if path.exists() => ConfigSource::UserConfigDir(path),
            _ => ConfigSource::Defaults,
        }
    }
}

impl Default for ConfigLocator {
    fn default() -> Self {
        Self::new()
    }
}
