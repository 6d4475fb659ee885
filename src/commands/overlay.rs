//! `overlay` - create a patched overlay of the base

use super::{add_optional_resource, ensure_new_overlay, parse_key_value, validate_input_file};
use crate::error::Error;
use crate::files::FileMap;
use crate::manifest::read_base_app;
use crate::models::{Application, Kustomization, ResourceQuantities};
use crate::naming::resolve_namespace;
use crate::settings::Settings;
use crate::templates::{self, Resource};
use anyhow::{Context, Result};
use clap::Args;
use std::collections::HashSet;
use std::path::PathBuf;

/// Generates an overlay with optional config files, secrets, replicas and
/// resource patches on top of the base.
#[derive(Args, Debug, Clone, Default)]
pub struct OverlayArgs {
    /// Namespace and overlay directory, used when neither -n nor -s is given
    pub target: Option<String>,

    /// Namespace suffix, the namespace becomes <app>-<suffix>
    #[arg(short, long)]
    pub suffix: Option<String>,

    /// Full namespace, takes precedence over the suffix
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Generate a namespace resource for the overlay
    #[arg(short, long)]
    pub resource: bool,

    /// Generate an ingress resource with the given host
    #[arg(long)]
    pub ingress: Option<String>,

    /// Config file for the config map generator as name=content (repeatable)
    #[arg(short = 'c', long = "configFile", value_parser = parse_key_value)]
    pub config_files: Vec<(String, String)>,

    /// Mount path of the config map volume [default: /config/]
    #[arg(long = "configPath")]
    pub config_path: Option<String>,

    /// Env file for the secret generator as name=content (repeatable)
    #[arg(short = 'e', long = "secretEnv", value_parser = parse_key_value)]
    pub secret_envs: Vec<(String, String)>,

    /// Number of replicas
    #[arg(long)]
    pub replicas: Option<u32>,

    /// Resource limits e.g. cpu=500m,memory=256Mi
    #[arg(long)]
    pub limits: Option<ResourceQuantities>,

    /// Resource requests e.g. cpu=250m,memory=128Mi
    #[arg(long)]
    pub requests: Option<ResourceQuantities>,

    /// Overwrite an existing overlay directory
    #[arg(short, long)]
    pub force: bool,
}

/// Write the overlay and return its directory
pub fn run(args: &OverlayArgs, settings: &Settings) -> Result<PathBuf> {
    let mut seen = HashSet::new();
    for (name, content) in args.config_files.iter().chain(&args.secret_envs) {
        validate_input_file(name, content)?;
        if !seen.insert(name.as_str()) {
            return Err(Error::InvalidInputFile {
                name: name.clone(),
                reason: "given more than once",
            }
            .into());
        }
    }

    let base = read_base_app(&settings.directory)?;
    let target = resolve_namespace(
        "overlay",
        args.namespace.as_deref(),
        args.suffix.as_deref(),
        args.target.as_deref(),
        &base.name,
    )?;

    let overlay_dir = settings.overlay_dir(&target.dir);
    ensure_new_overlay(&overlay_dir, args.force)?;

    let mut app = Application::new(&base.name);
    if let Some(image) = base.image {
        app.image = image;
    }
    app.namespace = Some(target.namespace.clone());
    app.container_port = base.port;
    app.host = args.ingress.clone();
    app.config_path = args
        .config_path
        .clone()
        .unwrap_or_else(|| settings.config.config_path.clone());
    app.replicas = args.replicas;
    app.limits = args.limits.clone().unwrap_or_default();
    app.requests = args.requests.clone().unwrap_or_default();

    tracing::info!(
        "Creating overlay {} with namespace {}",
        overlay_dir.display(),
        target.namespace
    );

    let mut kustomization = Kustomization::new(Some(target.namespace));
    kustomization.add_resource(settings.base_reference());

    let mut files = FileMap::new();
    if args.resource {
        add_optional_resource(Resource::Namespace, &app, &mut kustomization, &mut files);
    }
    if app.host.is_some() {
        add_optional_resource(Resource::Ingress, &app, &mut kustomization, &mut files);
    }

    if !args.config_files.is_empty() {
        let patch = templates::generate(Resource::ConfigPatch, &app, &mut files)
            .context("Could not create deployment patch with given config file")?;
        kustomization.add_patch(patch);

        let generator = format!("{}-config", app.name);
        for (name, content) in &args.config_files {
            files.add(name, content);
            kustomization.add_config(&generator, name);
        }
    }

    if !args.secret_envs.is_empty() {
        let patch = templates::generate(Resource::SecretPatch, &app, &mut files)
            .context("Could not create deployment patch with given secret env")?;
        kustomization.add_patch(patch);

        let generator = format!("{}-secret", app.name);
        for (name, content) in &args.secret_envs {
            files.add(name, content);
            kustomization.add_secret(&generator, name);
        }
    }

    let patches = [
        (args.replicas.is_some(), Resource::ReplicaPatch),
        (args.limits.is_some(), Resource::LimitsPatch),
        (args.requests.is_some(), Resource::RequestsPatch),
    ];
    for (_, resource) in patches.into_iter().filter(|(enabled, _)| *enabled) {
        let patch = templates::generate(resource, &app, &mut files)
            .with_context(|| format!("Could not create {}", resource))?;
        kustomization.add_patch(patch);
    }

    templates::create_kustomization(&kustomization, &mut files)?;
    files.write_all(&overlay_dir)?;

    Ok(overlay_dir)
}
