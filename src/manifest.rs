//! Base deployment reader
//!
//! Reads `<directory>/base/deployment.yaml` and extracts what later commands
//! need from it: the application name, the image and the container port.

use crate::error::{Error, Result};
use k8s_openapi::api::apps::v1::DeploymentSpec;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::path::{Path, PathBuf};

/// Name of the base directory inside the platform directory
pub const BASE_DIR: &str = "base";

/// File name of the base deployment manifest
pub const DEPLOYMENT_FILE: &str = "deployment.yaml";

/// Fields extracted from a base deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseApp {
    pub name: String,
    pub image: Option<String>,
    pub port: Option<u16>,
}

/// Path of the base deployment manifest for a platform directory
pub fn base_deployment_path(directory: &Path) -> PathBuf {
    directory.join(BASE_DIR).join(DEPLOYMENT_FILE)
}

/// Read the base deployment of a platform directory
pub fn read_base_app(directory: &Path) -> Result<BaseApp> {
    let path = base_deployment_path(directory);
    let contents = std::fs::read_to_string(&path).map_err(|source| Error::BaseUnreadable {
        path: path.clone(),
        source,
    })?;
    parse_base_app(&contents, &path)
}

/// Extract the base application from deployment YAML
///
/// `path` is only used in error messages.
pub fn parse_base_app(contents: &str, path: &Path) -> Result<BaseApp> {
    let invalid = |reason: String| Error::InvalidManifest {
        path: path.to_path_buf(),
        reason,
    };

    let value: serde_yaml::Value =
        serde_yaml::from_str(contents).map_err(|e| invalid(e.to_string()))?;

    let kind = value.get("kind").and_then(|k| k.as_str()).unwrap_or_default();
    if kind != "Deployment" {
        return Err(Error::NotADeployment(kind.to_string()));
    }

    // Only `kind` decides; any apiVersion of a Deployment is accepted
    let metadata: ObjectMeta = match value.get("metadata") {
        Some(metadata) => {
            serde_yaml::from_value(metadata.clone()).map_err(|e| invalid(e.to_string()))?
        }
        None => ObjectMeta::default(),
    };
    let spec: Option<DeploymentSpec> = value
        .get("spec")
        .map(|spec| serde_yaml::from_value(spec.clone()))
        .transpose()
        .map_err(|e| invalid(e.to_string()))?;

    let name = metadata.name.unwrap_or_default();
    tracing::debug!(
        "Read base deployment file {}. Using {} as application name",
        path.display(),
        name
    );

    let first_container = spec
        .as_ref()
        .and_then(|spec| spec.template.spec.as_ref())
        .and_then(|pod| pod.containers.first());

    let Some(container) = first_container else {
        tracing::warn!("Cannot determine container port from base deployment");
        return Ok(BaseApp {
            name,
            image: None,
            port: None,
        });
    };

    let port = container
        .ports
        .as_ref()
        .and_then(|ports| ports.first())
        .and_then(|port| u16::try_from(port.container_port).ok());
    if port.is_none() {
        tracing::warn!(
            "Container {} declares no usable port in base deployment",
            container.name
        );
    }

    Ok(BaseApp {
        name,
        image: container.image.clone(),
        port,
    })
}
