//! File-backed document collections.
//!
//! Each configured collection is a JSON array (`.json`) or YAML sequence
//! (`.yaml`, `.yml`) of document records. Files are read on every lookup so
//! each render sees the current contents.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use navtree_core::{CollectionResolver, TreeError};
use serde_json::Value;

/// Collection resolver over files named in the config.
#[derive(Debug, Default)]
pub(crate) struct FileCollections {
    files: BTreeMap<String, PathBuf>,
}

impl FileCollections {
    /// Create a resolver over `name -> file` mappings.
    pub(crate) fn new(files: BTreeMap<String, PathBuf>) -> Self {
        Self { files }
    }

    /// Configured collection names, sorted.
    pub(crate) fn names(&self) -> Vec<&str> {
        self.files.keys().map(String::as_str).collect()
    }
}

impl CollectionResolver for FileCollections {
    fn resolve(&self, name: &str) -> Result<Value, TreeError> {
        let path = self
            .files
            .get(name)
            .ok_or_else(|| TreeError::CollectionNotFound(name.to_owned()))?;

        tracing::debug!(collection = name, path = %path.display(), "Loading collection");

        read_collection_file(path).map_err(|reason| TreeError::CollectionUnavailable {
            name: name.to_owned(),
            reason,
        })
    }
}

/// Read and parse a collection file, choosing the format by extension.
///
/// Unknown extensions are parsed as JSON.
pub(crate) fn read_collection_file(path: &Path) -> Result<Value, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        serde_yaml::from_str(&content)
            .map_err(|e| format!("invalid YAML in {}: {e}", path.display()))
    } else {
        serde_json::from_str(&content)
            .map_err(|e| format!("invalid JSON in {}: {e}", path.display()))
    }
}
