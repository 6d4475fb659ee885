//! `config` subcommand handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};

use crate::config::{self, ConfigLoader, paths};

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ConfigSubcommand {
    /// Get configuration value
    Get {
        /// Configuration key (e.g., "suffix", "configPath")
        key: Option<String>,
    },
    /// Set configuration value
    Set {
        /// Configuration key (e.g., "suffix", "configPath")
        key: String,
        /// Configuration value
        value: String,
    },
    /// List all configuration
    List,
    /// Show configuration file path
    Path,
    /// Validate configuration
    Validate,
}

/// Handle configuration subcommands
///
/// `explicit` is the global `--config` path, if any.
pub fn handle_config_command(cmd: ConfigSubcommand, explicit: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigSubcommand::Get { key } => {
            let loaded = ConfigLoader::load(explicit).context("Failed to load configuration")?;

            if let Some(key) = key {
                let value = config::get_config_value(&loaded.config, &key)?;
                println!("{}", value);
            } else {
                let yaml = serde_yaml::to_string(&loaded.config)
                    .context("Failed to serialize configuration")?;
                print!("{}", yaml);
            }
        }
        ConfigSubcommand::Set { key, value } => {
            let path = config_path(explicit);
            // Only the file layer is edited, environment overrides are not persisted
            let mut config = if path.exists() {
                ConfigLoader::load_file(&path)?
            } else {
                ConfigLoader::load_defaults()
            };

            config::set_config_value(&mut config, &key, &value)
                .with_context(|| format!("Failed to set {} = {}", key, value))?;

            ConfigLoader::save(&config, &path).context("Failed to save configuration")?;
            println!("Configuration saved to {}", path.display());
        }
        ConfigSubcommand::List => {
            let loaded = ConfigLoader::load(explicit).context("Failed to load configuration")?;
            match &loaded.source {
                Some(source) => println!("# {}", source.display()),
                None => println!("# defaults"),
            }
            let yaml = serde_yaml::to_string(&loaded.config)
                .context("Failed to serialize configuration")?;
            print!("{}", yaml);
        }
        ConfigSubcommand::Path => {
            println!("{}", config_path(explicit).display());
        }
        ConfigSubcommand::Validate => {
            ConfigLoader::validate(explicit).context("Configuration validation failed")?;
            println!("Configuration is valid");
        }
    }

    Ok(())
}

fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(paths::default_config_path)
}
