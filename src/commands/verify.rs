//! `verify` - build every kustomization under the platform directory

use crate::error::Error;
use crate::manifest::read_base_app;
use crate::models::KUSTOMIZATION_FILE;
use crate::settings::Settings;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use walkdir::WalkDir;

/// Builds a single kustomization directory
#[cfg_attr(test, mockall::automock)]
pub trait KustomizeBuild {
    fn build(&self, dir: &Path) -> Result<()>;
}

/// The kustomize binary found on the `PATH`
#[derive(Debug, Clone)]
pub struct KustomizeBinary {
    path: PathBuf,
}

impl KustomizeBinary {
    /// Locate `name` (a bare binary name or a path)
    pub fn locate(name: &str) -> Result<Self, Error> {
        let path = which::which(name).map_err(|_| Error::KustomizeNotFound(name.to_string()))?;
        tracing::debug!("Using kustomize at {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KustomizeBuild for KustomizeBinary {
    fn build(&self, dir: &Path) -> Result<()> {
        let status = Command::new(&self.path)
            .arg("build")
            .arg(dir)
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("Failed to run {}", self.path.display()))?;

        if !status.success() {
            return Err(Error::BuildFailed {
                path: dir.to_path_buf(),
                reason: status.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// Verify with the kustomize binary named in the configuration
pub fn run(settings: &Settings) -> Result<usize> {
    let binary = KustomizeBinary::locate(&settings.config.kustomize)?;
    verify_with(settings, &binary)
}

/// Walk the platform directory and build each kustomization, stopping at the
/// first failure. Returns the number of directories built.
pub fn verify_with(settings: &Settings, builder: &dyn KustomizeBuild) -> Result<usize> {
    let base = read_base_app(&settings.directory)?;
    tracing::info!(
        "Verifying {} for application {}",
        settings.directory.display(),
        base.name
    );

    let mut built = 0;
    for entry in WalkDir::new(&settings.directory)
        .min_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| {
            format!("Could not traverse {}", settings.directory.display())
        })?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let dir = entry.path();
        if !dir.join(KUSTOMIZATION_FILE).is_file() {
            tracing::info!("Treating {} as context directory", dir.display());
            continue;
        }

        tracing::info!("Building {}", dir.display());
        builder.build(dir)?;
        built += 1;
    }

    tracing::info!("Verified {} kustomizations", built);
    Ok(built)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add::{self, AddArgs};
    use crate::commands::base::{self, BaseArgs};
    use std::sync::{Arc, Mutex};

    fn platform() -> (tempfile::TempDir, Settings) {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::new(dir.path().join("platform"));
        base::run(&BaseArgs::new("app"), &settings).unwrap();
        add::run(&AddArgs::default(), &settings).unwrap();
        std::fs::create_dir_all(settings.directory.join("usa")).unwrap();
        (dir, settings)
    }

    #[test]
    fn test_builds_each_kustomization_in_order() {
        let (_dir, settings) = platform();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&seen);

        let mut builder = MockKustomizeBuild::new();
        builder.expect_build().times(2).returning(move |dir| {
            let name = dir.file_name().unwrap().to_string_lossy().to_string();
            recorder.lock().unwrap().push(name);
            Ok(())
        });

        let built = verify_with(&settings, &builder).unwrap();

        assert_eq!(built, 2);
        assert_eq!(*seen.lock().unwrap(), vec!["base", "dev"]);
    }

    #[test]
    fn test_first_failure_aborts() {
        let (_dir, settings) = platform();

        let mut builder = MockKustomizeBuild::new();
        builder
            .expect_build()
            .times(1)
            .returning(|dir| Err(anyhow::anyhow!("cannot build {}", dir.display())));

        assert!(verify_with(&settings, &builder).is_err());
    }

    #[test]
    fn test_requires_base() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::new(dir.path());

        let mut builder = MockKustomizeBuild::new();
        builder.expect_build().never();

        let err = verify_with(&settings, &builder).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::BaseUnreadable { .. })
        ));
    }

    #[test]
    fn test_locate_missing_binary() {
        let err = KustomizeBinary::locate("kustgen-no-such-kustomize").unwrap_err();
        assert!(matches!(err, Error::KustomizeNotFound(_)));
    }
}
