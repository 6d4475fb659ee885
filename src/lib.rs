//! kustgen library
//!
//! Scaffolds Kustomize base and overlay directories for Kubernetes
//! applications. Used by the `kustgen` binary and by the integration tests.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod files;
pub mod manifest;
pub mod models;
pub mod naming;
pub mod settings;
pub mod templates;

// Re-export commonly used types for convenience
pub use error::{Error, RenderError};
pub use files::FileMap;
pub use manifest::{BaseApp, read_base_app};
pub use models::{Application, Kustomization, ResourceQuantities};
pub use settings::Settings;
pub use templates::Resource;
