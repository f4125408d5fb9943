use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// User configuration, read from `~/.reflag/config.yaml`
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Default dialect per translator, e.g. `ls2eza: bsd`
    #[serde(default)]
    pub modes: HashMap<String, String>,
    #[serde(default)]
    pub init: InitConfig,
}

/// Selection used when generating shell init output
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct InitConfig {
    /// Shell used when `--init` is given without one
    #[serde(default)]
    pub shell: Option<String>,

    /// Translators to add on top of the default set
    #[serde(default)]
    pub include: Vec<String>,

    /// Translators to leave out even if included by default
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl InitConfig {
    /// Whether a translator ends up in the init output
    #[must_use]
    pub fn selects(&self, name: &str, included_by_default: bool) -> bool {
        if self.exclude.iter().any(|n| n == name) {
            return false;
        }
        included_by_default || self.include.iter().any(|n| n == name)
    }
}

impl Config {
    /// Load configuration from default location
    pub fn load_default() -> Result<Self> {
        let config_path = Self::default_config_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        // An empty file deserializes to unit, not to an empty map
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(config)
    }

    /// Get default configuration path
    pub fn default_config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Failed to get home directory")?;

        Ok(home.join(".reflag").join("config.yaml"))
    }

    /// Configured mode for a translator, if any
    #[must_use]
    pub fn mode_for(&self, translator: &str) -> Option<&str> {
        self.modes.get(translator).map(String::as_str)
    }
}
