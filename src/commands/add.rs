//! `add` - add an overlay that only references the base

use super::{add_optional_resource, ensure_new_overlay};
use crate::error::Error;
use crate::files::FileMap;
use crate::manifest::read_base_app;
use crate::models::{Application, Kustomization};
use crate::naming::resolve_namespace;
use crate::settings::Settings;
use crate::templates::{self, Resource};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Adds a new overlay based on the base directory.
#[derive(Args, Debug, Clone, Default)]
pub struct AddArgs {
    /// Namespace suffix, the namespace becomes <app>-<suffix> [default: dev]
    #[arg(short, long)]
    pub suffix: Option<String>,

    /// Full namespace, takes precedence over the suffix
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Generate a namespace resource for the overlay
    #[arg(short, long)]
    pub resource: bool,

    /// Overwrite an existing overlay directory
    #[arg(short, long)]
    pub force: bool,
}

/// Write the overlay and return its directory
pub fn run(args: &AddArgs, settings: &Settings) -> Result<PathBuf> {
    let base_dir = settings.base_dir();
    if !base_dir.is_dir() {
        return Err(Error::MissingBase(base_dir).into());
    }

    let base = read_base_app(&settings.directory)?;
    let suffix = args
        .suffix
        .as_deref()
        .unwrap_or(settings.config.suffix.as_str());
    let target = resolve_namespace("add", args.namespace.as_deref(), Some(suffix), None, &base.name)?;

    let overlay_dir = settings.overlay_dir(&target.dir);
    ensure_new_overlay(&overlay_dir, args.force)?;

    tracing::info!(
        "Adding overlay {} with namespace {}",
        overlay_dir.display(),
        target.namespace
    );

    let mut app = Application::new(&base.name);
    app.namespace = Some(target.namespace.clone());

    let mut kustomization = Kustomization::new(Some(target.namespace));
    kustomization.add_resource(settings.base_reference());

    let mut files = FileMap::new();
    if args.resource {
        add_optional_resource(Resource::Namespace, &app, &mut kustomization, &mut files);
    }

    templates::create_kustomization(&kustomization, &mut files)?;
    files.write_all(&overlay_dir)?;

    Ok(overlay_dir)
}
