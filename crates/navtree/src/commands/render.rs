//! `navtree render` command implementation.

use std::path::PathBuf;

use clap::Args;
use navtree_config::{CliSettings, Config};
use navtree_core::{CollectionRef, NodeView, TreeError, TreeHelper};
use serde_json::json;

use crate::collections::{FileCollections, read_collection_file};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Path to configuration file (default: auto-discover navtree.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Collection to render (overrides config).
    #[arg(long, conflicts_with = "file")]
    collection: Option<String>,

    /// Render documents from this JSON or YAML file instead of a named collection.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// URL of the current page, enables active/current flags.
    #[arg(long)]
    context: Option<String>,

    /// Keep the site root as a top-level "/" item (overrides config).
    #[arg(long)]
    include_root: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the collection cannot be
    /// loaded, or a document is invalid.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            collection: self.collection,
            include_root: self.include_root.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let collection = match &self.file {
            Some(path) => {
                let value = read_collection_file(path).map_err(|reason| {
                    TreeError::CollectionUnavailable {
                        name: path.display().to_string(),
                        reason,
                    }
                })?;
                CollectionRef::Resolved(value)
            }
            None => {
                let name = &config.tree.collection;
                tracing::info!(
                    collection = %name,
                    file = ?config.collection_path(name),
                    "Rendering collection"
                );
                CollectionRef::Named(name.clone())
            }
        };

        let context = self.context.map(|url| json!({ "url": url }));
        let helper = TreeHelper::new(FileCollections::new(config.collections_resolved.clone()));

        let nav = match helper.call(Some(collection), context.as_ref(), config.tree.include_root) {
            Ok(nav) => nav,
            Err(err @ TreeError::CollectionNotFound(_)) => {
                output.warning(&missing_collection_hint(&config, &helper.resolver().names()));
                return Err(err.into());
            }
            Err(err) => return Err(err.into()),
        };

        tracing::info!(
            items = count_items(&nav),
            include_root = config.tree.include_root,
            "Rendered navigation"
        );

        output.data(&render_json(&nav, self.pretty)?)?;
        Ok(())
    }
}

/// Hint shown when the requested collection is not configured.
fn missing_collection_hint(config: &Config, names: &[&str]) -> String {
    if config.config_path.is_none() {
        "No navtree.toml found; pass --config or use --file".to_owned()
    } else if names.is_empty() {
        "No collections configured; add a [collections] table or use --file".to_owned()
    } else {
        format!("Configured collections: {}", names.join(", "))
    }
}

/// Serialize navigation items as JSON.
fn render_json(nav: &[NodeView], pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(nav)
    } else {
        serde_json::to_string(nav)
    }
}

/// Count items at every depth.
fn count_items(nav: &[NodeView]) -> usize {
    nav.iter()
        .map(|item| 1 + count_items(&item.children))
        .sum()
}
