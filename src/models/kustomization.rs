//! Kustomization accumulator
//!
//! Collects resources, patches and generator inputs for one directory and
//! renders them as a `kustomization.yaml` document.

use serde::Serialize;

/// API version written into every generated kustomization
pub const KUSTOMIZATION_API_VERSION: &str = "kustomize.config.k8s.io/v1beta1";

/// File name of the kustomization manifest in every directory
pub const KUSTOMIZATION_FILE: &str = "kustomization.yaml";

/// ConfigMap generator entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigMapGenerator {
    pub name: String,
    pub files: Vec<String>,
}

/// Secret generator entry built from env files
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretGenerator {
    pub name: String,
    pub envs: Vec<String>,
    #[serde(rename = "type")]
    pub secret_type: String,
}

/// Accumulator for a single `kustomization.yaml`
///
/// List order is insertion order. Generators are keyed by name, so adding a
/// second file under an existing name extends that generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kustomization {
    api_version: &'static str,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
    resources: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    patches_strategic_merge: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    config_map_generator: Vec<ConfigMapGenerator>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    secret_generator: Vec<SecretGenerator>,
}

impl Kustomization {
    /// Create an empty kustomization, optionally pinned to a namespace
    pub fn new(namespace: Option<String>) -> Self {
        Self {
            api_version: KUSTOMIZATION_API_VERSION,
            kind: "Kustomization",
            namespace,
            resources: Vec::new(),
            patches_strategic_merge: Vec::new(),
            config_map_generator: Vec::new(),
            secret_generator: Vec::new(),
        }
    }

    /// Create a kustomization over an existing list of resources
    pub fn with_resources(resources: Vec<String>, namespace: Option<String>) -> Self {
        Self {
            resources,
            ..Self::new(namespace)
        }
    }

    /// Add a kubernetes resource file or a base/overlay directory
    pub fn add_resource(&mut self, resource: impl Into<String>) {
        self.resources.push(resource.into());
    }

    /// Add a strategic merge patch file
    pub fn add_patch(&mut self, patch: impl Into<String>) {
        self.patches_strategic_merge.push(patch.into());
    }

    /// Add a file to the named config map generator
    pub fn add_config(&mut self, name: &str, file: impl Into<String>) {
        let file = file.into();
        match self.config_map_generator.iter_mut().find(|g| g.name == name) {
            Some(generator) => generator.files.push(file),
            None => self.config_map_generator.push(ConfigMapGenerator {
                name: name.to_string(),
                files: vec![file],
            }),
        }
    }

    /// Add an env file to the named secret generator
    pub fn add_secret(&mut self, name: &str, env_file: impl Into<String>) {
        let env_file = env_file.into();
        match self.secret_generator.iter_mut().find(|g| g.name == name) {
            Some(generator) => generator.envs.push(env_file),
            None => self.secret_generator.push(SecretGenerator {
                name: name.to_string(),
                envs: vec![env_file],
                secret_type: "Opaque".to_string(),
            }),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    pub fn patches(&self) -> &[String] {
        &self.patches_strategic_merge
    }

    pub fn config_generators(&self) -> &[ConfigMapGenerator] {
        &self.config_map_generator
    }

    pub fn secret_generators(&self) -> &[SecretGenerator] {
        &self.secret_generator
    }

    /// Render the accumulated state as YAML
    pub fn render(&self) -> serde_yaml::Result<String> {
        serde_yaml::to_string(self)
    }
}
