//! `group` - bundle several kustomizations into one

use crate::error::Error;
use crate::files::FileMap;
use crate::models::Kustomization;
use crate::naming::{absolutize, relative_path};
use crate::templates;
use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

/// Groups kustomization folders into a single kustomization.
#[derive(Args, Debug, Clone, Default)]
pub struct GroupArgs {
    /// Kustomization folder to include (repeatable)
    #[arg(short = 'k', long = "kustomization", required = true)]
    pub kustomizations: Vec<PathBuf>,

    /// Check that every folder exists
    #[arg(short, long)]
    pub verify: bool,

    /// Directory the grouping kustomization is written to
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

/// Write `<output>/kustomization.yaml` relative to the current directory
pub fn run(args: &GroupArgs) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Could not determine current directory")?;
    run_in(args, &cwd)
}

/// Write `<output>/kustomization.yaml`, resolving relative paths against `cwd`
pub fn run_in(args: &GroupArgs, cwd: &Path) -> Result<PathBuf> {
    let output = absolutize(&args.output, cwd);

    let mut kustomization = Kustomization::new(None);
    for folder in &args.kustomizations {
        let folder = absolutize(folder, cwd);
        if args.verify && !folder.is_dir() {
            return Err(Error::NotADirectory(folder).into());
        }
        let resource = relative_path(&output, &folder);
        tracing::debug!("Adding {} to group", resource.display());
        kustomization.add_resource(resource.to_string_lossy());
    }

    let mut files = FileMap::new();
    templates::create_kustomization(&kustomization, &mut files)?;
    files.write_all(&output)?;
    tracing::info!(
        "Grouped {} kustomizations in {}",
        args.kustomizations.len(),
        output.display()
    );

    Ok(output)
}
