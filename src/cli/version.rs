//! `version` subcommand

/// Package metadata and the default config file path
pub fn version_info() -> String {
    format!(
        "{} {}\n{}\nlicense: {}\nconfig: {}\n",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_LICENSE"),
        crate::config::paths::default_config_path().display(),
    )
}

pub fn display_version() {
    print!("{}", version_info());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info_names_package() {
        let info = version_info();
        assert!(info.starts_with(&format!("kustgen {}", env!("CARGO_PKG_VERSION"))));
        assert!(info.contains("config: "));
    }
}
