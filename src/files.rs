//! In-memory file map
//!
//! Generators add rendered files here; a command flushes the whole map to one
//! directory at the end.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Mapping from relative file name to full file content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMap {
    files: BTreeMap<String, String>,
}

impl FileMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, replacing any previous content under the same name
    pub fn add(&mut self, file_name: impl Into<String>, content: impl Into<String>) {
        self.files.insert(file_name.into(), content.into());
    }

    pub fn get(&self, file_name: &str) -> Option<&str> {
        self.files.get(file_name).map(String::as_str)
    }

    /// File names in sorted order
    pub fn file_names(&self) -> Vec<String> {
        self.files.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Create `dir` and write every non-empty file into it
    ///
    /// An existing directory is fine; existing files are overwritten. Returns
    /// the number of files written.
    pub fn write_all(&self, dir: &Path) -> Result<usize> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create directory {}", dir.display()))?;

        let mut written = 0;
        for (file_name, content) in &self.files {
            if content.is_empty() {
                tracing::debug!("Skipping empty file {}", file_name);
                continue;
            }

            let path = dir.join(file_name);
            std::fs::write(&path, content)
                .with_context(|| format!("Failed writing content to {}", path.display()))?;
            tracing::debug!("Wrote {} bytes to {}", content.len(), path.display());
            written += 1;
        }

        Ok(written)
    }
}
