//! Configuration schema definitions
//!
//! Defines the structure of the configuration file using serde for serialization.
//! Every value here is a default for a command-line flag.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory for kustomization files and folders
    #[serde(default = "default_directory")]
    pub directory: String,

    /// Namespace suffix used by `add` when none is given
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Container port for new bases
    #[serde(default = "default_port")]
    pub port: u16,

    /// Service protocol for new bases
    #[serde(default = "default_protocol")]
    pub protocol: String,

    /// Mount path for generated config maps
    #[serde(default = "default_config_path")]
    pub config_path: String,

    /// Kustomize binary used by `verify`
    #[serde(default = "default_kustomize")]
    pub kustomize: String,
}

// Default value functions
fn default_directory() -> String {
    "platform".to_string()
}

fn default_suffix() -> String {
    "dev".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_protocol() -> String {
    "TCP".to_string()
}

fn default_config_path() -> String {
    "/config/".to_string()
}

fn default_kustomize() -> String {
    "kustomize".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            suffix: default_suffix(),
            port: default_port(),
            protocol: default_protocol(),
            config_path: default_config_path(),
            kustomize: default_kustomize(),
        }
    }
}
