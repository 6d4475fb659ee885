//! Command implementations
//!
//! One module per verb. Commands take their clap arguments and the
//! per-invocation [`Settings`](crate::settings::Settings); the generating
//! ones return the directory they wrote to.

pub mod add;
pub mod base;
pub mod group;
pub mod image;
pub mod overlay;
pub mod verify;

use crate::error::Error;
use crate::files::FileMap;
use crate::models::{Application, KUSTOMIZATION_FILE, Kustomization};
use crate::templates::{self, Resource};
use std::path::Path;

/// Parse a `name=content` pair for file-carrying flags
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (name, content) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid name=content: no `=` found in `{}`", s))?;
    let name = name.trim();
    validate_input_file(name, content).map_err(|e| e.to_string())?;
    Ok((name.to_string(), content.to_string()))
}

/// Check a user supplied file before it joins an overlay
///
/// The name must be a plain file name that no generated file uses, and the
/// content must not be empty since empty files are never written.
pub fn validate_input_file(name: &str, content: &str) -> Result<(), Error> {
    let invalid = |reason: &'static str| Error::InvalidInputFile {
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("missing file name"));
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(invalid("must be a plain file name without directories"));
    }
    let reserved = name == KUSTOMIZATION_FILE
        || Resource::ALL.iter().any(|r| r.file_name() == name);
    if reserved {
        return Err(invalid("collides with a generated file"));
    }
    if content.is_empty() {
        return Err(invalid("content is empty"));
    }
    Ok(())
}

/// Refuse to reuse an overlay directory unless forced
pub(crate) fn ensure_new_overlay(dir: &Path, force: bool) -> Result<(), Error> {
    if dir.is_dir() && !force {
        return Err(Error::OverlayExists(dir.to_path_buf()));
    }
    Ok(())
}

/// Generate a resource that the overlay can live without
///
/// On failure the resource is left out of the kustomization with a warning.
pub(crate) fn add_optional_resource(
    resource: Resource,
    app: &Application,
    kustomization: &mut Kustomization,
    files: &mut FileMap,
) {
    match templates::generate(resource, app, files) {
        Ok(file_name) => kustomization.add_resource(file_name),
        Err(e) => tracing::warn!("Could not create {}: {}", resource, e),
    }
}
