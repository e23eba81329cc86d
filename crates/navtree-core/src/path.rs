//! URL normalization for tree building and active-path comparison.
//!
//! A URL is reduced to its canonical form by deleting, in a single pass,
//! every match of one of three patterns:
//!
//! - a leading `/`
//! - a trailing `/`
//! - a trailing `index.<ext>` filename (`index.html`, `index.md`, ...)
//!
//! The patterns are matched against the original string, so removing a
//! trailing `index.html` does not expose a new trailing slash:
//! `/about/index.html` becomes `about/`, not `about`.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Matches the parts of a URL that are stripped before comparison.
///
/// `\w` is spelled out as an ASCII class so extensions match the same
/// characters regardless of Unicode word rules.
static URL_NOISE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/|/$|index\.[0-9A-Za-z_]*$").unwrap());

/// Return the canonical form of `url`.
///
/// Borrows the input when nothing matches.
///
/// # Example
///
/// ```
/// use navtree_core::canonical_path;
///
/// assert_eq!(canonical_path("/blog/post-1/"), "blog/post-1");
/// assert_eq!(canonical_path("/index.html"), "");
/// assert_eq!(canonical_path("guide"), "guide");
/// ```
#[must_use]
pub fn canonical_path(url: &str) -> Cow<'_, str> {
    URL_NOISE_RE.replace_all(url, "")
}

/// Split `url` into its non-empty canonical segments.
///
/// # Example
///
/// ```
/// use navtree_core::path_segments;
///
/// assert_eq!(path_segments("/docs//guide/index.md"), vec!["docs", "guide"]);
/// assert!(path_segments("/").is_empty());
/// ```
#[must_use]
pub fn path_segments(url: &str) -> Vec<String> {
    canonical_path(url)
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
        .collect()
}
