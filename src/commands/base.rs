//! `base` - define the base kustomization for an application

use crate::files::FileMap;
use crate::models::{Application, Kustomization};
use crate::settings::Settings;
use crate::templates::{self, base_resources};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Generates base kustomization files for the given application name.
/// Defaults to creating a base in the platform directory.
#[derive(Args, Debug, Clone, Default)]
pub struct BaseArgs {
    /// Application name
    pub name: String,

    /// Set image e.g nginx:1.7.9 [default: <name>:latest]
    #[arg(short, long)]
    pub image: Option<String>,

    /// Set container port [default: 8080]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Set protocol [default: TCP]
    #[arg(long)]
    pub protocol: Option<String>,

    /// Enable ingress resource generation with given host
    #[arg(long)]
    pub ingress: Option<String>,
}

impl BaseArgs {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    fn application(&self, settings: &Settings) -> Application {
        let mut app = Application::new(&self.name);
        if let Some(image) = self.image.as_deref().filter(|i| !i.trim().is_empty()) {
            app.image = image.trim().to_string();
        }
        app.container_port = Some(self.port.unwrap_or(settings.config.port));
        app.protocol = self
            .protocol
            .clone()
            .unwrap_or_else(|| settings.config.protocol.clone())
            .to_uppercase();
        app.host = self.ingress.clone();
        app
    }
}

/// Write `<directory>/base` and return its path
pub fn run(args: &BaseArgs, settings: &Settings) -> Result<PathBuf> {
    let app = args.application(settings);
    tracing::info!(
        "Initializing {} for application {}",
        settings.directory.display(),
        app.name
    );

    if settings.directory.is_dir() {
        tracing::warn!(
            "Platform directory {} already exists",
            settings.directory.display()
        );
    }

    let base_dir = settings.base_dir();
    std::fs::create_dir_all(&base_dir).with_context(|| {
        format!(
            "Cannot create platform directory {}",
            settings.directory.display()
        )
    })?;
    tracing::info!("Creating directory {}", base_dir.display());

    let mut files = FileMap::new();
    for resource in base_resources(app.host.is_some()) {
        templates::generate(resource, &app, &mut files)
            .with_context(|| format!("Could not create resource {}", resource))?;
    }

    let kustomization = Kustomization::with_resources(files.file_names(), None);
    templates::create_kustomization(&kustomization, &mut files)?;

    let written = files.write_all(&base_dir)?;
    tracing::info!("Wrote {} files to {}", written, base_dir.display());

    Ok(base_dir)
}
