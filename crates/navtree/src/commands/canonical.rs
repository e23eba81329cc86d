//! `navtree canonical` command implementation.

use clap::Args;
use navtree_core::{canonical_path, path_segments};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the canonical command.
#[derive(Args)]
pub(crate) struct CanonicalArgs {
    /// URLs to normalize.
    #[arg(required = true)]
    urls: Vec<String>,
}

impl CanonicalArgs {
    /// Execute the canonical command.
    ///
    /// Prints one tab-separated line per URL: the input, its canonical form
    /// and its segments joined by `/`.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        for url in &self.urls {
            output.data(&describe(url))?;
        }
        Ok(())
    }
}

fn describe(url: &str) -> String {
    format!(
        "{url}\t{}\t{}",
        canonical_path(url),
        path_segments(url).join("/")
    )
}
