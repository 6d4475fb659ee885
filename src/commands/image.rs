//! `modify image` - derive an overlay that swaps the container image

use crate::error::Error;
use crate::files::FileMap;
use crate::manifest::read_base_app;
use crate::models::{Application, KUSTOMIZATION_FILE, Kustomization};
use crate::naming::{image_version, resolve_namespace};
use crate::settings::Settings;
use crate::templates::{self, Resource};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Creates a new overlay from an existing one with a different image.
/// The new overlay is written next to the source as <overlay>-<version>.
#[derive(Args, Debug, Clone, Default)]
pub struct ImageArgs {
    /// Existing overlay namespace and directory, used when neither -n nor -s is given
    pub target: Option<String>,

    /// New container image e.g. app:v1.2.3
    #[arg(short, long, required = true)]
    pub image: String,

    /// Namespace suffix of the source overlay
    #[arg(short, long)]
    pub suffix: Option<String>,

    /// Full namespace of the source overlay
    #[arg(short, long)]
    pub namespace: Option<String>,
}

/// Write the image overlay and return its absolute directory
pub fn run(args: &ImageArgs, settings: &Settings) -> Result<PathBuf> {
    let image = args.image.trim();
    if image.is_empty() {
        return Err(Error::EmptyImage.into());
    }
    let base = read_base_app(&settings.directory)?;
    let target = resolve_namespace(
        "image",
        args.namespace.as_deref(),
        args.suffix.as_deref(),
        args.target.as_deref(),
        &base.name,
    )?;

    let source_dir = settings.overlay_dir(&target.dir);
    if !source_dir.join(KUSTOMIZATION_FILE).is_file() {
        return Err(Error::MissingKustomization(source_dir).into());
    }

    if base.image.as_deref() == Some(image) {
        return Err(Error::SameImage(image.to_string()).into());
    }

    let version = image_version(image);
    let output_dir = settings.overlay_dir(&format!("{}-{}", target.dir, version));
    tracing::info!(
        "Creating image overlay {} from {}",
        output_dir.display(),
        source_dir.display()
    );

    let mut app = Application::new(&base.name);
    app.image = image.to_string();
    app.namespace = Some(target.namespace.clone());
    app.container_port = base.port;

    let mut kustomization = Kustomization::new(Some(target.namespace));
    kustomization.add_resource(format!("../{}", target.dir));

    let mut files = FileMap::new();
    let patch = templates::generate(Resource::ImagePatch, &app, &mut files)
        .context("Could not create image patch")?;
    kustomization.add_patch(patch);

    templates::create_kustomization(&kustomization, &mut files)?;
    files.write_all(&output_dir)?;

    output_dir
        .canonicalize()
        .with_context(|| format!("Could not resolve {}", output_dir.display()))
}
