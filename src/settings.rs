//! Per-invocation settings
//!
//! Built once in `main` from the global flags and the loaded configuration,
//! then passed to every command.

use crate::config::Config;
use crate::manifest::BASE_DIR;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Platform directory holding the base and its overlays
    pub directory: PathBuf,
    /// Optional grouping directory between the platform directory and overlays
    pub context: Option<String>,
    /// Flag defaults from the configuration file and environment
    pub config: Config,
}

impl Settings {
    /// Settings for `directory` with no context and default configuration
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            context: None,
            config: Config::default(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into()).filter(|c: &String| !c.is_empty());
        self
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn base_dir(&self) -> PathBuf {
        self.directory.join(BASE_DIR)
    }

    /// Directory overlays are created in
    pub fn overlay_root(&self) -> PathBuf {
        match &self.context {
            Some(context) => self.directory.join(context),
            None => self.directory.clone(),
        }
    }

    pub fn overlay_dir(&self, name: &str) -> PathBuf {
        self.overlay_root().join(name)
    }

    /// Reference to the base from inside an overlay directory
    pub fn base_reference(&self) -> String {
        match &self.context {
            Some(_) => format!("../../{}", BASE_DIR),
            None => format!("../{}", BASE_DIR),
        }
    }
}
