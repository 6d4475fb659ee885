//! Configuration file path resolution
//!
//! The configuration file is a dot-file in the user's home directory unless
//! `KUSTGEN_CONFIG` or the `--config` flag points elsewhere.

use std::path::{Path, PathBuf};

/// File name of the default configuration file
pub const CONFIG_FILE_NAME: &str = ".kustgen.yaml";

/// Get the user's home directory
///
/// Falls back to the current directory when no home can be determined.
pub fn home_dir() -> PathBuf {
    use directories::BaseDirs;
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the default configuration file path
///
/// Checks KUSTGEN_CONFIG first, then falls back to `~/.kustgen.yaml`.
pub fn default_config_path() -> PathBuf {
    std::env::var("KUSTGEN_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(CONFIG_FILE_NAME))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
