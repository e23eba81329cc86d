//! Ordered, filtered navigation output.
//!
//! [`Tree::to_views`] turns a [`Tree`] into a list of [`NodeView`] records
//! ready for a menu template:
//!
//! - siblings are sorted by `order`, ascending, keeping insertion order for ties
//!   (intermediate items sort as `0`)
//! - hidden entries are dropped together with everything below them
//! - with a context document, entries are flagged `active` when the context
//!   URL starts with the entry URL and `current` when both are equal (after
//!   normalization)
//! - leaves carry no `children` field when serialized, intermediate items
//!   carry only `children`
//!
//! The tree is only borrowed, so one tree can be rendered for many contexts.

use indexmap::IndexMap;
use serde::Serialize;

use crate::document::Document;
use crate::path::canonical_path;
use crate::tree::{Node, Tree};

/// Navigation item with children for UI tree.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeView {
    /// Path segment this item was built for (`"/"` for the synthetic root).
    #[serde(skip)]
    pub segment: String,
    /// Display title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Link target, absent for intermediate items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Sort key, absent for intermediate items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
    /// `Some(false)` for entries, hidden items are never emitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    /// Context URL is inside this item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    /// Context URL is this item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<bool>,
    /// Child navigation items.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeView>,
}

impl Tree {
    /// Render the tree as ordered navigation items.
    ///
    /// `context` is the page being rendered; pass `None` to skip the
    /// `active`/`current` flags entirely.
    ///
    /// # Example
    ///
    /// ```
    /// use navtree_core::{Document, Tree};
    ///
    /// let docs = vec![
    ///     Document::new("/blog/").with_title("Blog").with_order(2.0),
    ///     Document::new("/blog/post-1/").with_title("Post"),
    ///     Document::new("/about/").with_title("About").with_order(1.0),
    /// ];
    /// let tree = Tree::from_documents(&docs, false);
    ///
    /// let nav = tree.to_views(Some(&Document::new("/blog/post-1/")));
    /// assert_eq!(nav[0].title.as_deref(), Some("About"));
    /// assert_eq!(nav[1].active, Some(true));
    /// assert_eq!(nav[1].current, Some(false));
    /// assert_eq!(nav[1].children[0].current, Some(true));
    /// ```
    #[must_use]
    pub fn to_views(&self, context: Option<&Document>) -> Vec<NodeView> {
        let context_url = context.map(|doc| canonical_path(&doc.url));
        build_level(self.roots(), context_url.as_deref())
    }
}

/// Sort one sibling level and render its visible nodes.
fn build_level(nodes: &IndexMap<String, Node>, context_url: Option<&str>) -> Vec<NodeView> {
    let mut sorted: Vec<(&String, &Node)> = nodes.iter().collect();
    // `sort_by` is stable, so equal orders keep insertion order
    sorted.sort_by(|(_, a), (_, b)| a.order().total_cmp(&b.order()));

    sorted
        .into_iter()
        .filter(|(_, node)| !node.is_hidden())
        .map(|(segment, node)| build_view(segment, node, context_url))
        .collect()
}

/// Recursively build a [`NodeView`] from a visible node.
fn build_view(segment: &str, node: &Node, context_url: Option<&str>) -> NodeView {
    let entry = node.entry();

    let (active, current) = match (context_url, entry) {
        (Some(context_url), Some(entry)) => {
            let url = canonical_path(&entry.url);
            (
                Some(context_url.starts_with(url.as_ref())),
                Some(context_url == url),
            )
        }
        _ => (None, None),
    };

    NodeView {
        segment: segment.to_owned(),
        title: entry.and_then(|e| e.title.clone()),
        url: entry.map(|e| e.url.clone()),
        order: entry.map(|e| e.order),
        hidden: entry.map(|_| false),
        active,
        current,
        children: build_level(node.children(), context_url),
    }
}
