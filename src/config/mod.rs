//! Configuration system for kustgen
//!
//! Values in the configuration file act as defaults for command-line flags.
//! Environment variables override the file; flags override both.

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::{ConfigLoader, LoadedConfig};
pub use schema::Config;

/// Configuration keys accepted by `config get` and `config set`
pub const CONFIG_KEYS: &[&str] = &[
    "directory",
    "suffix",
    "port",
    "protocol",
    "configPath",
    "kustomize",
];

/// Get a configuration value by key
pub fn get_config_value(config: &schema::Config, key: &str) -> anyhow::Result<String> {
    match key {
        "directory" => Ok(config.directory.clone()),
        "suffix" => Ok(config.suffix.clone()),
        "port" => Ok(config.port.to_string()),
        "protocol" => Ok(config.protocol.clone()),
        "configPath" => Ok(config.config_path.clone()),
        "kustomize" => Ok(config.kustomize.clone()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key
pub fn set_config_value(config: &mut schema::Config, key: &str, value: &str) -> anyhow::Result<()> {
    use anyhow::Context;
    match key {
        "directory" => {
            config.directory = value.to_string();
        }
        "suffix" => {
            config.suffix = value.to_string();
        }
        "port" => {
            config.port = value
                .parse()
                .context("port must be a number between 1 and 65535")?;
        }
        "protocol" => {
            config.protocol = value.to_uppercase();
        }
        "configPath" => {
            config.config_path = value.to_string();
        }
        "kustomize" => {
            config.kustomize = value.to_string();
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}
