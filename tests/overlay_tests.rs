//! Tests for the add and overlay commands

use kustgen::commands::add::{self, AddArgs};
use kustgen::commands::base::{self, BaseArgs};
use kustgen::commands::overlay::{self, OverlayArgs};
use kustgen::{Error, ResourceQuantities, Settings};
use std::path::Path;
use tempfile::TempDir;

fn platform() -> (TempDir, Settings) {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::new(dir.path().join("platform"));
    base::run(&BaseArgs::new("app"), &settings).unwrap();
    (dir, settings)
}

fn yaml(path: &Path) -> serde_yaml::Value {
    let contents =
        std::fs::read_to_string(path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e));
    serde_yaml::from_str(&contents).unwrap()
}

fn strings(value: &serde_yaml::Value) -> Vec<String> {
    value
        .as_sequence()
        .map(|seq| {
            seq.iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn domain_error(err: &anyhow::Error) -> &Error {
    err.downcast_ref::<Error>()
        .unwrap_or_else(|| panic!("not a domain error: {:#}", err))
}

#[test]
fn test_add_uses_default_suffix() {
    let (_dir, settings) = platform();

    let overlay_dir = add::run(&AddArgs::default(), &settings).unwrap();

    assert_eq!(overlay_dir, settings.directory.join("dev"));
    let kustomization = yaml(&overlay_dir.join("kustomization.yaml"));
    assert_eq!(kustomization["namespace"], "app-dev");
    assert_eq!(strings(&kustomization["resources"]), vec!["../base"]);
    assert!(kustomization.get("patchesStrategicMerge").is_none());
}

#[test]
fn test_add_with_namespace_resource() {
    let (_dir, settings) = platform();
    let args = AddArgs {
        namespace: Some("custom-ns".to_string()),
        resource: true,
        ..Default::default()
    };

    let overlay_dir = add::run(&args, &settings).unwrap();

    assert_eq!(overlay_dir, settings.directory.join("custom-ns"));
    let kustomization = yaml(&overlay_dir.join("kustomization.yaml"));
    assert_eq!(kustomization["namespace"], "custom-ns");
    assert_eq!(
        strings(&kustomization["resources"]),
        vec!["../base", "namespace.yaml"]
    );
    assert_eq!(
        yaml(&overlay_dir.join("namespace.yaml"))["metadata"]["name"],
        "custom-ns"
    );
}

#[test]
fn test_add_requires_base() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::new(dir.path().join("platform"));

    let err = add::run(&AddArgs::default(), &settings).unwrap_err();
    assert!(matches!(domain_error(&err), Error::MissingBase(_)));
}

#[test]
fn test_add_refuses_existing_overlay_without_force() {
    let (_dir, settings) = platform();
    add::run(&AddArgs::default(), &settings).unwrap();

    let err = add::run(&AddArgs::default(), &settings).unwrap_err();
    assert!(matches!(domain_error(&err), Error::OverlayExists(_)));

    let forced = AddArgs {
        force: true,
        ..Default::default()
    };
    assert!(add::run(&forced, &settings).is_ok());
}

#[test]
fn test_add_with_context() {
    let (_dir, settings) = platform();
    let settings = settings.with_context("usa");
    let args = AddArgs {
        suffix: Some("qa".to_string()),
        ..Default::default()
    };

    let overlay_dir = add::run(&args, &settings).unwrap();

    assert_eq!(overlay_dir, settings.directory.join("usa").join("qa"));
    let kustomization = yaml(&overlay_dir.join("kustomization.yaml"));
    assert_eq!(kustomization["namespace"], "app-qa");
    assert_eq!(strings(&kustomization["resources"]), vec!["../../base"]);
}

#[test]
fn test_overlay_positional_namespace() {
    let (_dir, settings) = platform();
    let args = OverlayArgs {
        target: Some("staging".to_string()),
        ..Default::default()
    };

    let overlay_dir = overlay::run(&args, &settings).unwrap();

    assert_eq!(overlay_dir, settings.directory.join("staging"));
    assert_eq!(
        yaml(&overlay_dir.join("kustomization.yaml"))["namespace"],
        "staging"
    );
}

#[test]
fn test_overlay_namespace_flag_wins_over_suffix() {
    let (_dir, settings) = platform();
    let args = OverlayArgs {
        target: Some("ignored".to_string()),
        suffix: Some("dev".to_string()),
        namespace: Some("custom-ns".to_string()),
        ..Default::default()
    };

    let overlay_dir = overlay::run(&args, &settings).unwrap();

    assert_eq!(overlay_dir, settings.directory.join("custom-ns"));
    assert!(!settings.directory.join("dev").exists());
}

#[test]
fn test_overlay_without_namespace_fails() {
    let (_dir, settings) = platform();

    let err = overlay::run(&OverlayArgs::default(), &settings).unwrap_err();
    assert!(matches!(
        domain_error(&err),
        Error::MissingNamespace { command: "overlay" }
    ));
}

#[test]
fn test_overlay_with_config_and_secrets() {
    let (_dir, settings) = platform();
    let args = OverlayArgs {
        suffix: Some("dev".to_string()),
        config_files: vec![
            ("app.yaml".to_string(), "key: value\n".to_string()),
            ("extra.yaml".to_string(), "other: value\n".to_string()),
        ],
        secret_envs: vec![("dev.env".to_string(), "PASSWORD=secret\n".to_string())],
        config_path: Some("/etc/app/".to_string()),
        ..Default::default()
    };

    let overlay_dir = overlay::run(&args, &settings).unwrap();

    assert_eq!(
        std::fs::read_to_string(overlay_dir.join("app.yaml")).unwrap(),
        "key: value\n"
    );
    assert_eq!(
        std::fs::read_to_string(overlay_dir.join("dev.env")).unwrap(),
        "PASSWORD=secret\n"
    );

    let kustomization = yaml(&overlay_dir.join("kustomization.yaml"));
    assert_eq!(
        strings(&kustomization["patchesStrategicMerge"]),
        vec!["deployment-config-patch.yaml", "deployment-secret-patch.yaml"]
    );
    assert_eq!(kustomization["configMapGenerator"][0]["name"], "app-config");
    assert_eq!(
        strings(&kustomization["configMapGenerator"][0]["files"]),
        vec!["app.yaml", "extra.yaml"]
    );
    assert_eq!(kustomization["secretGenerator"][0]["name"], "app-secret");
    assert_eq!(
        strings(&kustomization["secretGenerator"][0]["envs"]),
        vec!["dev.env"]
    );
    assert_eq!(kustomization["secretGenerator"][0]["type"], "Opaque");

    let patch = yaml(&overlay_dir.join("deployment-config-patch.yaml"));
    let container = &patch["spec"]["template"]["spec"]["containers"][0];
    assert_eq!(container["volumeMounts"][0]["mountPath"], "/etc/app/");
}

#[test]
fn test_overlay_with_replicas_and_resources() {
    let (_dir, settings) = platform();
    let args = OverlayArgs {
        suffix: Some("prod".to_string()),
        replicas: Some(3),
        limits: Some(ResourceQuantities {
            cpu: Some("500m".to_string()),
            memory: Some("256Mi".to_string()),
        }),
        requests: Some(ResourceQuantities {
            cpu: None,
            memory: Some("128Mi".to_string()),
        }),
        ..Default::default()
    };

    let overlay_dir = overlay::run(&args, &settings).unwrap();

    let kustomization = yaml(&overlay_dir.join("kustomization.yaml"));
    assert_eq!(kustomization["namespace"], "app-prod");
    assert_eq!(
        strings(&kustomization["patchesStrategicMerge"]),
        vec![
            "deployment-replica-patch.yaml",
            "deployment-limits-patch.yaml",
            "deployment-requests-patch.yaml",
        ]
    );

    assert_eq!(
        yaml(&overlay_dir.join("deployment-replica-patch.yaml"))["spec"]["replicas"],
        3
    );
    let limits = yaml(&overlay_dir.join("deployment-limits-patch.yaml"));
    let resources = &limits["spec"]["template"]["spec"]["containers"][0]["resources"];
    assert_eq!(resources["limits"]["cpu"], "500m");
    assert_eq!(resources["limits"]["memory"], "256Mi");

    let requests = yaml(&overlay_dir.join("deployment-requests-patch.yaml"));
    let resources = &requests["spec"]["template"]["spec"]["containers"][0]["resources"];
    assert!(resources["requests"].get("cpu").is_none());
    assert_eq!(resources["requests"]["memory"], "128Mi");
}

#[test]
fn test_overlay_with_ingress_uses_base_port() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::new(dir.path().join("platform"));
    let base_args = BaseArgs {
        port: Some(3000),
        ..BaseArgs::new("app")
    };
    base::run(&base_args, &settings).unwrap();

    let args = OverlayArgs {
        suffix: Some("dev".to_string()),
        ingress: Some("dev.example.com".to_string()),
        ..Default::default()
    };
    let overlay_dir = overlay::run(&args, &settings).unwrap();

    let kustomization = yaml(&overlay_dir.join("kustomization.yaml"));
    assert_eq!(
        strings(&kustomization["resources"]),
        vec!["../base", "ingress.yaml"]
    );
    let ingress = yaml(&overlay_dir.join("ingress.yaml"));
    let backend = &ingress["spec"]["rules"][0]["http"]["paths"][0]["backend"];
    assert_eq!(backend["service"]["port"]["number"], 3000);
}

#[test]
fn test_overlay_requires_base_deployment() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::new(dir.path().join("platform"));
    let args = OverlayArgs {
        suffix: Some("dev".to_string()),
        ..Default::default()
    };

    let err = overlay::run(&args, &settings).unwrap_err();
    assert!(matches!(domain_error(&err), Error::BaseUnreadable { .. }));
}

#[test]
fn test_overlay_rejects_non_deployment_base() {
    let (_dir, settings) = platform();
    std::fs::write(
        settings.base_dir().join("deployment.yaml"),
        "apiVersion: v1\nkind: Service\nmetadata:\n  name: app\n",
    )
    .unwrap();
    let args = OverlayArgs {
        suffix: Some("dev".to_string()),
        ..Default::default()
    };

    let err = overlay::run(&args, &settings).unwrap_err();
    assert!(matches!(domain_error(&err), Error::NotADeployment(kind) if kind == "Service"));
}

fn overlay_with_config(name: &str, content: &str) -> OverlayArgs {
    OverlayArgs {
        suffix: Some("dev".to_string()),
        config_files: vec![(name.to_string(), content.to_string())],
        ..Default::default()
    }
}

#[test]
fn test_overlay_rejects_empty_config_file() {
    let (_dir, settings) = platform();

    let err = overlay::run(&overlay_with_config("app.yaml", ""), &settings).unwrap_err();

    assert!(matches!(domain_error(&err), Error::InvalidInputFile { .. }));
    assert!(!settings.directory.join("dev").exists());
}

#[test]
fn test_overlay_rejects_file_outside_overlay() {
    let (dir, settings) = platform();

    let err =
        overlay::run(&overlay_with_config("../../escaped.yaml", "x: 1"), &settings).unwrap_err();

    assert!(matches!(domain_error(&err), Error::InvalidInputFile { .. }));
    assert!(!dir.path().join("escaped.yaml").exists());
    assert!(!settings.directory.join("dev").exists());
}

#[test]
fn test_overlay_rejects_generated_file_names() {
    let (_dir, settings) = platform();

    for name in ["deployment-config-patch.yaml", "kustomization.yaml"] {
        let err = overlay::run(&overlay_with_config(name, "x: 1"), &settings).unwrap_err();
        assert!(matches!(domain_error(&err), Error::InvalidInputFile { .. }));
    }
    assert!(!settings.directory.join("dev").exists());
}

#[test]
fn test_overlay_rejects_shared_config_and_secret_name() {
    let (_dir, settings) = platform();
    let args = OverlayArgs {
        secret_envs: vec![("app.yaml".to_string(), "A=B".to_string())],
        ..overlay_with_config("app.yaml", "x: 1")
    };

    let err = overlay::run(&args, &settings).unwrap_err();
    assert!(matches!(domain_error(&err), Error::InvalidInputFile { .. }));
}
