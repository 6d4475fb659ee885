//! Configuration loading and merging logic
//!
//! Handles loading configuration from the config file and environment and
//! merging them according to precedence rules.

use super::{defaults, paths, schema::Config};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variables that override configuration values
pub const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("KUSTGEN_DIRECTORY", "directory"),
    ("KUSTGEN_SUFFIX", "suffix"),
    ("KUSTGEN_PORT", "port"),
    ("KUSTGEN_PROTOCOL", "protocol"),
    ("KUSTGEN_CONFIG_PATH", "configPath"),
    ("KUSTGEN_KUSTOMIZE", "kustomize"),
];

/// Configuration loader
pub struct ConfigLoader;

/// A loaded configuration and the file it came from, if any
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: Option<PathBuf>,
}

impl ConfigLoader {
    /// Load configuration with all layers merged
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Config file (`explicit`, or the default dot-file)
    /// 3. Built-in defaults
    ///
    /// An explicit path must exist; a missing default file is skipped.
    pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig> {
        let mut loaded = LoadedConfig {
            config: Self::load_defaults(),
            source: None,
        };

        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => paths::default_config_path(),
        };

        if explicit.is_some() || path.exists() {
            loaded.config = Self::load_file(&path)?;
            loaded.source = Some(path);
        }

        loaded.config = Self::apply_env_overrides(loaded.config, |key| std::env::var(key).ok());

        Ok(loaded)
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        // An empty file is a valid, all-defaults configuration
        if contents.trim().is_empty() {
            return Ok(Self::load_defaults());
        }

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration file, failing on syntax errors and bad values
    pub fn validate(explicit: Option<&Path>) -> Result<()> {
        let loaded = Self::load(explicit).context("Failed to load configuration")?;

        if loaded.config.directory.trim().is_empty() {
            return Err(anyhow::anyhow!("directory must not be empty"));
        }
        if loaded.config.port == 0 {
            return Err(anyhow::anyhow!("port must be between 1 and 65535"));
        }
        if loaded.config.kustomize.trim().is_empty() {
            return Err(anyhow::anyhow!("kustomize must not be empty"));
        }

        Ok(())
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    /// Apply environment variable overrides read through `lookup`
    pub fn apply_env_overrides(
        mut config: Config,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Config {
        for (var, key) in ENV_OVERRIDES {
            let Some(value) = lookup(var) else {
                continue;
            };
            if let Err(e) = super::set_config_value(&mut config, key, &value) {
                tracing::warn!("Ignoring {}={}: {}", var, value, e);
            }
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            paths::ensure_dir(parent)?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}
