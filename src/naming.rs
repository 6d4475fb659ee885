//! Naming policies for overlay directories
//!
//! Namespace resolution, image version extraction and the relative path
//! arithmetic used when one kustomization references another.

use crate::error::{Error, Result};
use regex::Regex;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

/// Version component used when an image reference carries no tag
pub const UNKNOWN_VERSION: &str = "UNKNOWN";

/// Namespace an overlay deploys into and the directory it is written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceTarget {
    pub namespace: String,
    pub dir: String,
}

/// Resolve the namespace and overlay directory for a command
///
/// Order: explicit namespace, then `<app>-<suffix>`, then the positional
/// argument verbatim. With none of them set the command cannot proceed.
pub fn resolve_namespace(
    command: &'static str,
    namespace: Option<&str>,
    suffix: Option<&str>,
    positional: Option<&str>,
    app_name: &str,
) -> Result<NamespaceTarget> {
    fn non_empty(v: Option<&str>) -> Option<&str> {
        v.filter(|s| !s.is_empty())
    }

    if let Some(namespace) = non_empty(namespace) {
        return Ok(NamespaceTarget {
            namespace: namespace.to_string(),
            dir: namespace.to_string(),
        });
    }

    if let Some(suffix) = non_empty(suffix) {
        return Ok(NamespaceTarget {
            namespace: format!("{}-{}", app_name, suffix),
            dir: suffix.to_string(),
        });
    }

    match non_empty(positional) {
        Some(arg) => Ok(NamespaceTarget {
            namespace: arg.to_string(),
            dir: arg.to_string(),
        }),
        None => Err(Error::MissingNamespace { command }),
    }
}

fn tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r":([^:/]+)$").expect("image tag pattern is valid"))
}

/// Extract the tag of an image reference (`repo:tag` gives `tag`)
///
/// Returns [`UNKNOWN_VERSION`] when there is no tag. A registry port such as
/// `host:5000/app` is not mistaken for one.
pub fn image_version(image: &str) -> String {
    let image = image.trim();
    let without_digest = image.split('@').next().unwrap_or(image);
    tag_regex()
        .captures(without_digest)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_VERSION.to_string())
}

/// Lexically normalize a path, folding `.` and `..` components
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let ends_in_normal = matches!(out.components().next_back(), Some(Component::Normal(_)));
                if ends_in_normal {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Make `path` absolute against `cwd` and normalize it
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&cwd.join(path))
    }
}

/// Relative path leading from directory `from` to `to`
///
/// Both paths must be absolute; they are normalized first.
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from = normalize(from);
    let to = normalize(to);

    let from_parts: Vec<Component> = from.components().collect();
    let to_parts: Vec<Component> = to.components().collect();

    let common = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..from_parts.len() {
        rel.push("..");
    }
    for part in &to_parts[common..] {
        rel.push(part.as_os_str());
    }
    if rel.as_os_str().is_empty() {
        rel.push(".");
    }
    rel
}
