//! Domain errors
//!
//! Failures that callers may want to match on. Everything else travels as
//! `anyhow::Error` with context attached at the command level.

use std::path::PathBuf;

/// Errors raised while reading inputs or laying out overlay directories
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No namespace or namespace suffix provided!")]
    MissingNamespace { command: &'static str },

    #[error(
        "Could not open base deployment file {path}: {source}. Make sure you have a base deployment or call kustgen base"
    )]
    BaseUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Base directory {0} doesn't exist")]
    MissingBase(PathBuf),

    #[error("Error unmarshalling {path}: {reason}")]
    InvalidManifest { path: PathBuf, reason: String },

    #[error("Kubernetes resource file is not a Deployment (found kind {0:?})")]
    NotADeployment(String),

    #[error("Invalid input file {name:?}: {reason}")]
    InvalidInputFile { name: String, reason: &'static str },

    #[error("Image must not be empty")]
    EmptyImage,

    #[error("{0} directory already exists")]
    OverlayExists(PathBuf),

    #[error("Could not open {0}/kustomization.yaml")]
    MissingKustomization(PathBuf),

    #[error("Base image is the same as the input image: {0}")]
    SameImage(String),

    #[error("{0} does not exist or is not a directory")]
    NotADirectory(PathBuf),

    #[error("{0} is not installed")]
    KustomizeNotFound(String),

    #[error("Failed to build kustomization {path}: {reason}")]
    BuildFailed { path: PathBuf, reason: String },
}

/// Errors raised when a template is rendered without the inputs it needs
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("Could not create {file}: {field} is not set")]
    MissingField {
        file: &'static str,
        field: &'static str,
    },
}

/// Result type for domain operations
pub type Result<T> = std::result::Result<T, Error>;
