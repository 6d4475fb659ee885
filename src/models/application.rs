//! Application record used as template input

use std::fmt;
use std::str::FromStr;

/// CPU and memory quantities for a container's requests or limits
///
/// Parsed from `cpu=<quantity>,memory=<quantity>`; either key may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceQuantities {
    pub cpu: Option<String>,
    pub memory: Option<String>,
}

impl ResourceQuantities {
    pub fn is_empty(&self) -> bool {
        self.cpu.is_none() && self.memory.is_none()
    }
}

impl FromStr for ResourceQuantities {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut quantities = ResourceQuantities::default();

        for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| format!("expected key=value, got '{}'", pair))?;
            let value = value.trim();
            if value.is_empty() {
                return Err(format!("empty quantity for '{}'", key.trim()));
            }
            match key.trim() {
                "cpu" => quantities.cpu = Some(value.to_string()),
                "memory" => quantities.memory = Some(value.to_string()),
                other => return Err(format!("unknown resource '{}' (use cpu or memory)", other)),
            }
        }

        if quantities.is_empty() {
            return Err("no cpu or memory quantity given".to_string());
        }
        Ok(quantities)
    }
}

impl fmt::Display for ResourceQuantities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = [("cpu", &self.cpu), ("memory", &self.memory)]
            .into_iter()
            .filter_map(|(key, value)| value.as_ref().map(|v| format!("{}={}", key, v)))
            .collect();
        write!(f, "{}", parts.join(","))
    }
}

/// A single application and the configuration its resources are rendered from
///
/// Constructed fresh for every command; only the rendered YAML is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub name: String,
    pub namespace: Option<String>,
    pub image: String,
    pub container_name: String,
    pub container_port: Option<u16>,
    pub protocol: String,
    pub host: Option<String>,
    pub config_path: String,
    pub replicas: Option<u32>,
    pub requests: ResourceQuantities,
    pub limits: ResourceQuantities,
}

impl Application {
    /// Create an application whose container is named after it
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            image: format!("{}:latest", name),
            container_name: name.clone(),
            name,
            namespace: None,
            container_port: None,
            protocol: "TCP".to_string(),
            host: None,
            config_path: "/config/".to_string(),
            replicas: None,
            requests: ResourceQuantities::default(),
            limits: ResourceQuantities::default(),
        }
    }
}
