//! Resource templates
//!
//! Fixed YAML templates for the Kubernetes resources and strategic merge
//! patches this tool writes. Each [`Resource`] renders an [`Application`] into
//! one file; [`generate`] adds the result to a [`FileMap`].

use crate::error::RenderError;
use crate::files::FileMap;
use crate::models::{Application, KUSTOMIZATION_FILE, Kustomization, ResourceQuantities};
use anyhow::{Context, Result};
use std::fmt;

/// Every resource or patch file this tool can generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Deployment,
    Service,
    Ingress,
    Namespace,
    ImagePatch,
    ConfigPatch,
    SecretPatch,
    ReplicaPatch,
    LimitsPatch,
    RequestsPatch,
}

impl Resource {
    pub const ALL: [Resource; 10] = [
        Resource::Deployment,
        Resource::Service,
        Resource::Ingress,
        Resource::Namespace,
        Resource::ImagePatch,
        Resource::ConfigPatch,
        Resource::SecretPatch,
        Resource::ReplicaPatch,
        Resource::LimitsPatch,
        Resource::RequestsPatch,
    ];

    /// File name the rendered resource is stored under
    pub fn file_name(&self) -> &'static str {
        match self {
            Resource::Deployment => "deployment.yaml",
            Resource::Service => "service.yaml",
            Resource::Ingress => "ingress.yaml",
            Resource::Namespace => "namespace.yaml",
            Resource::ImagePatch => "deployment-image-patch.yaml",
            Resource::ConfigPatch => "deployment-config-patch.yaml",
            Resource::SecretPatch => "deployment-secret-patch.yaml",
            Resource::ReplicaPatch => "deployment-replica-patch.yaml",
            Resource::LimitsPatch => "deployment-limits-patch.yaml",
            Resource::RequestsPatch => "deployment-requests-patch.yaml",
        }
    }

    /// Render the template against an application
    pub fn render(&self, app: &Application) -> Result<String, RenderError> {
        let content = match self {
            Resource::Deployment => deployment(app, self.require_port(app)?),
            Resource::Service => service(app, self.require_port(app)?),
            Resource::Ingress => {
                let host = self.require(app.host.as_deref(), "ingress host")?;
                ingress(app, host, self.require_port(app)?)
            }
            Resource::Namespace => {
                namespace(self.require(app.namespace.as_deref(), "namespace")?)
            }
            Resource::ImagePatch => image_patch(app),
            Resource::ConfigPatch => config_patch(app),
            Resource::SecretPatch => secret_patch(app),
            Resource::ReplicaPatch => {
                let replicas = app.replicas.ok_or_else(|| self.missing("replicas"))?;
                replica_patch(app, replicas)
            }
            Resource::LimitsPatch => {
                if app.limits.is_empty() {
                    return Err(self.missing("limits"));
                }
                resources_patch(app, "limits", &app.limits)
            }
            Resource::RequestsPatch => {
                if app.requests.is_empty() {
                    return Err(self.missing("requests"));
                }
                resources_patch(app, "requests", &app.requests)
            }
        };
        Ok(content)
    }

    fn missing(&self, field: &'static str) -> RenderError {
        RenderError::MissingField {
            file: self.file_name(),
            field,
        }
    }

    fn require<'a>(&self, value: Option<&'a str>, field: &'static str) -> Result<&'a str, RenderError> {
        value.filter(|v| !v.is_empty()).ok_or_else(|| self.missing(field))
    }

    fn require_port(&self, app: &Application) -> Result<u16, RenderError> {
        app.container_port.ok_or_else(|| self.missing("container port"))
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.file_name();
        write!(f, "{}", name.strip_suffix(".yaml").unwrap_or(name))
    }
}

/// Resources generated for a base directory
pub fn base_resources(ingress: bool) -> Vec<Resource> {
    let mut resources = vec![Resource::Deployment, Resource::Service];
    if ingress {
        resources.push(Resource::Ingress);
    }
    resources
}

/// Render `resource` and add it to `files`, returning the file name
pub fn generate(
    resource: Resource,
    app: &Application,
    files: &mut FileMap,
) -> Result<&'static str, RenderError> {
    let content = resource.render(app)?;
    tracing::debug!("# Generated {}\n{}", resource, content);
    files.add(resource.file_name(), content);
    Ok(resource.file_name())
}

/// Render a kustomization and add it to `files` as `kustomization.yaml`
pub fn create_kustomization(kustomization: &Kustomization, files: &mut FileMap) -> Result<()> {
    let content = kustomization
        .render()
        .context("Could not create kustomization.yaml")?;
    tracing::debug!("# Generated kustomization\n{}", content);
    files.add(KUSTOMIZATION_FILE, content);
    Ok(())
}

fn deployment(app: &Application, port: u16) -> String {
    format!(
        r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: {name}
  labels:
    app: {name}
spec:
  replicas: 1
  selector:
    matchLabels:
      app: {name}
  template:
    metadata:
      labels:
        app: {name}
    spec:
      containers:
        - name: {container}
          image: {image}
          ports:
            - containerPort: {port}
"#,
        name = app.name,
        container = app.container_name,
        image = app.image,
        port = port,
    )
}

fn service(app: &Application, port: u16) -> String {
    format!(
        r#"apiVersion: v1
kind: Service
metadata:
  name: {name}
spec:
  selector:
    app: {name}
  ports:
    - protocol: {protocol}
      port: {port}
      targetPort: {port}
"#,
        name = app.name,
        protocol = app.protocol,
        port = port,
    )
}

fn ingress(app: &Application, host: &str, port: u16) -> String {
    format!(
        r#"apiVersion: networking.k8s.io/v1
kind: Ingress
metadata:
  name: {name}
spec:
  rules:
    - host: {host}
      http:
        paths:
          - path: /
            pathType: Prefix
            backend:
              service:
                name: {name}
                port:
                  number: {port}
"#,
        name = app.name,
        host = host,
        port = port,
    )
}

fn namespace(namespace: &str) -> String {
    format!(
        r#"apiVersion: v1
kind: Namespace
metadata:
  name: {namespace}
"#
    )
}

/// Common head of every deployment patch, down to the container entry
fn patch_head(app: &Application) -> String {
    format!(
        r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: {name}
spec:
  template:
    spec:
      containers:
        - name: {container}
"#,
        name = app.name,
        container = app.container_name,
    )
}

fn image_patch(app: &Application) -> String {
    format!("{}          image: {}\n", patch_head(app), app.image)
}

fn config_patch(app: &Application) -> String {
    format!(
        r#"{head}          volumeMounts:
            - mountPath: {path}
              name: {name}-config
      volumes:
        - name: {name}-config
          configMap:
            name: {name}-config
"#,
        head = patch_head(app),
        path = app.config_path,
        name = app.name,
    )
}

fn secret_patch(app: &Application) -> String {
    format!(
        r#"{head}          envFrom:
            - secretRef:
                name: {name}-secret
"#,
        head = patch_head(app),
        name = app.name,
    )
}

fn replica_patch(app: &Application, replicas: u32) -> String {
    format!(
        r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: {name}
spec:
  replicas: {replicas}
"#,
        name = app.name,
    )
}

fn resources_patch(app: &Application, section: &str, quantities: &ResourceQuantities) -> String {
    let mut out = format!("{}          resources:\n            {}:\n", patch_head(app), section);
    if let Some(cpu) = &quantities.cpu {
        out.push_str(&format!("              cpu: {}\n", cpu));
    }
    if let Some(memory) = &quantities.memory {
        out.push_str(&format!("              memory: {}\n", memory));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> Application {
        Application {
            container_port: Some(8080),
            ..Application::new("app")
        }
    }

    #[test]
    fn test_file_names_and_display() {
        assert_eq!(Resource::ReplicaPatch.file_name(), "deployment-replica-patch.yaml");
        assert_eq!(Resource::ImagePatch.to_string(), "deployment-image-patch");
        assert_eq!(Resource::Deployment.to_string(), "deployment");
    }

    #[test]
    fn test_base_resources() {
        assert_eq!(base_resources(false), vec![Resource::Deployment, Resource::Service]);
        assert_eq!(base_resources(true).last(), Some(&Resource::Ingress));
    }

    #[test]
    fn test_every_template_renders_valid_yaml() {
        let app = Application {
            namespace: Some("app-dev".to_string()),
            host: Some("example.com".to_string()),
            replicas: Some(3),
            limits: "cpu=1,memory=1Gi".parse().unwrap(),
            requests: "cpu=100m".parse().unwrap(),
            ..app()
        };

        for resource in Resource::ALL {
            let content = resource.render(&app).unwrap();
            let value: serde_yaml::Value = serde_yaml::from_str(&content)
                .unwrap_or_else(|e| panic!("{} is not valid YAML: {}", resource, e));
            assert!(value.get("kind").is_some(), "{} has no kind", resource);
        }
    }

    #[test]
    fn test_missing_inputs_fail() {
        let app = Application::new("app");
        assert_eq!(
            Resource::Namespace.render(&app),
            Err(RenderError::MissingField {
                file: "namespace.yaml",
                field: "namespace"
            })
        );
        assert!(Resource::Ingress.render(&app).is_err());
        assert!(Resource::Service.render(&app).is_err());
        assert!(Resource::ReplicaPatch.render(&app).is_err());
        assert!(Resource::LimitsPatch.render(&app).is_err());
        assert!(Resource::RequestsPatch.render(&app).is_err());
    }

    #[test]
    fn test_generate_adds_to_file_map() {
        let mut files = FileMap::new();
        let name = generate(Resource::Service, &app(), &mut files).unwrap();
        assert_eq!(name, "service.yaml");
        assert!(files.get("service.yaml").unwrap().contains("targetPort: 8080"));
    }

    #[test]
    fn test_resources_patch_only_lists_given_quantities() {
        let app = Application {
            requests: "memory=64Mi".parse().unwrap(),
            ..app()
        };
        let content = Resource::RequestsPatch.render(&app).unwrap();
        assert!(content.contains("requests:\n              memory: 64Mi\n"));
        assert!(!content.contains("cpu"));
    }
}
