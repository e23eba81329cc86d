//! Configuration management for navtree.
//!
//! Parses `navtree.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Example
//!
//! ```toml
//! [tree]
//! collection = "documents"
//! include_root = false
//!
//! [collections]
//! documents = "site/documents.json"
//! posts = "${POSTS_FILE:-posts.yaml}"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! Collection paths and `tree.collection` support `${VAR}` (error if unset)
//! and `${VAR:-default}`.

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use navtree_core::DEFAULT_COLLECTION;
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the collection to render.
    pub collection: Option<String>,
    /// Override the include-root flag.
    pub include_root: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "navtree.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tree building configuration.
    pub tree: TreeConfig,
    /// Collection files as written in TOML (relative, unexpanded).
    collections: BTreeMap<String, String>,

    /// Collection files resolved against the config directory (set after loading).
    #[serde(skip)]
    pub collections_resolved: BTreeMap<String, PathBuf>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Tree building configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Collection rendered when none is requested.
    pub collection: String,
    /// Keep the site root as a top-level `/` item.
    pub include_root: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION.to_owned(),
            include_root: false,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`collections.documents`").
        field: String,
        /// Error message (e.g., "${`DOCS_FILE`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `navtree.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Resolved file for a collection name.
    #[must_use]
    pub fn collection_path(&self, name: &str) -> Option<&Path> {
        self.collections_resolved.get(name).map(PathBuf::as_path)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(collection) = &settings.collection {
            self.tree.collection.clone_from(collection);
        }
        if let Some(include_root) = settings.include_root {
            self.tree.include_root = include_root;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the default collection or any
    /// collection entry is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.tree.collection, "tree.collection")?;
        for (name, path) in &self.collections {
            require_non_empty(name, "collections key")?;
            require_non_empty(path, &format!("collections.{name}"))?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.tree.collection = expand::expand_env(&self.tree.collection, "tree.collection")?;
        for (name, path) in &mut self.collections {
            *path = expand::expand_env(path, &format!("collections.{name}"))?;
        }
        Ok(())
    }

    /// Resolve collection files relative to the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.collections_resolved = self
            .collections
            .iter()
            .map(|(name, path)| (name.clone(), config_dir.join(path)))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.tree.collection, "documents");
        assert!(!config.tree.include_root);
        assert!(config.collections_resolved.is_empty());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.tree.collection, "documents");
        assert!(!config.tree.include_root);
    }

    #[test]
    fn test_parse_tree_config() {
        let toml = r#"
[tree]
collection = "pages"
include_root = true
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.tree.collection, "pages");
        assert!(config.tree.include_root);
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[collections]
documents = "site/documents.json"
posts = "/abs/posts.yaml"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.collection_path("documents"),
            Some(Path::new("/project/site/documents.json"))
        );
        assert_eq!(
            config.collection_path("posts"),
            Some(Path::new("/abs/posts.yaml"))
        );
        assert_eq!(config.collection_path("missing"), None);
    }

    #[test]
    fn test_validate_default_config_passes() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_collection_name() {
        let mut config = Config::default();
        config.tree.collection = "  ".to_owned();

        let err = config.validate().unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("tree.collection"));
    }

    #[test]
    fn test_validate_empty_collection_path() {
        let toml = r#"
[collections]
documents = ""
"#;
        let config: Config = toml::from_str(toml).unwrap();

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("collections.documents"));
    }

    #[test]
    fn test_apply_cli_settings_collection() {
        let mut config = Config::default();
        let overrides = CliSettings {
            collection: Some("posts".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.tree.collection, "posts");
        assert!(!config.tree.include_root); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_include_root() {
        let mut config = Config::default();
        let overrides = CliSettings {
            include_root: Some(true),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert!(config.tree.include_root);
        assert_eq!(config.tree.collection, "documents"); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default();

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.tree.collection, "documents");
        assert!(!config.tree.include_root);
    }

    #[test]
    fn test_expand_env_vars_collection_path() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("NAVTREE_TEST_POSTS", "generated/posts.json");
        }
        let toml = r#"
[collections]
posts = "${NAVTREE_TEST_POSTS}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();

        config.expand_env_vars().unwrap();
        config.resolve_paths(Path::new("/site"));

        assert_eq!(
            config.collection_path("posts"),
            Some(Path::new("/site/generated/posts.json"))
        );
        unsafe {
            std::env::remove_var("NAVTREE_TEST_POSTS");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("NAVTREE_TEST_MISSING");
        }
        let toml = r#"
[tree]
collection = "${NAVTREE_TEST_MISSING}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();

        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { ref field, .. } if field == "tree.collection"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("navtree.toml");
        std::fs::write(
            &path,
            r#"
[tree]
include_root = true

[collections]
documents = "documents.json"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert!(config.tree.include_root);
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(
            config.collection_path("documents"),
            Some(dir.path().join("documents.json").as_path())
        );
    }

    #[test]
    fn test_load_applies_cli_settings_after_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("navtree.toml");
        std::fs::write(&path, "[tree]\ncollection = \"pages\"\n").unwrap();
        let settings = CliSettings {
            collection: Some("posts".to_owned()),
            include_root: None,
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.tree.collection, "posts");
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/navtree.toml")), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("navtree.toml");
        std::fs::write(&path, "[tree\ncollection = ").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
