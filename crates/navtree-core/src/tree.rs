//! Tree construction from URL-tagged documents.
//!
//! Every document URL is split into canonical segments and inserted into a
//! nested map keyed by segment. Directories that only exist because deeper
//! documents pass through them become intermediate nodes without an
//! [`Entry`]; the node where a document's path ends receives the document's
//! entry.
//!
//! # Collisions
//!
//! Documents that normalize to the same segment path share a node. The later
//! document replaces the earlier entry; children are kept. `/guide/` and
//! `/guide/index.html` therefore compete for the same node.
//!
//! # Example
//!
//! ```
//! use navtree_core::{Document, Tree};
//!
//! let docs = vec![
//!     Document::new("/about/").with_title("About"),
//!     Document::new("/about/team/").with_title("Team"),
//! ];
//! let tree = Tree::from_documents(&docs, false);
//!
//! let about = tree.get(&["about"]).unwrap();
//! assert_eq!(about.entry().unwrap().title.as_deref(), Some("About"));
//! assert!(about.child("team").is_some());
//! ```

use indexmap::IndexMap;
use serde_json::Value;

use crate::document::Document;
use crate::error::TreeError;
use crate::path::path_segments;

/// Segment name of the synthetic root node added when the root is included.
pub const ROOT_SEGMENT: &str = "/";

/// Document fields stored at the node where the document's path ends.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Entry {
    /// Navigation label (`menu`, falling back to `title`).
    pub title: Option<String>,
    /// Original document URL.
    pub url: String,
    /// Sort key among siblings, always finite.
    pub order: f64,
    /// Hidden entries are dropped with their whole subtree.
    pub hidden: bool,
}

impl From<&Document> for Entry {
    fn from(doc: &Document) -> Self {
        Self {
            title: doc.label().map(str::to_owned),
            url: doc.url.clone(),
            order: sort_key(doc.order),
            hidden: doc.hidden,
        }
    }
}

/// Non-finite orders sort as `0`, and `-0.0` is folded into `0.0`.
fn sort_key(order: f64) -> f64 {
    if order.is_finite() && order != 0.0 {
        order
    } else {
        0.0
    }
}

/// One segment level of the tree.
///
/// Children keep the order in which their segment was first seen, which
/// is the tie-breaker when siblings share an `order`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Node {
    children: IndexMap<String, Node>,
    entry: Option<Entry>,
}

impl Node {
    /// Document fields, `None` for intermediate nodes.
    #[must_use]
    pub fn entry(&self) -> Option<&Entry> {
        self.entry.as_ref()
    }

    /// Child nodes keyed by segment, in first-insertion order.
    #[must_use]
    pub fn children(&self) -> &IndexMap<String, Node> {
        &self.children
    }

    /// Child node for `segment`.
    #[must_use]
    pub fn child(&self, segment: &str) -> Option<&Node> {
        self.children.get(segment)
    }

    /// Sort key, `0` for intermediate nodes.
    #[must_use]
    pub fn order(&self) -> f64 {
        self.entry.as_ref().map_or(0.0, |entry| entry.order)
    }

    /// Whether the node's entry is hidden.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.entry.as_ref().is_some_and(|entry| entry.hidden)
    }
}

/// Tree of documents keyed by top-level segment.
///
/// A tree is built once from a snapshot of documents and never mutated
/// afterwards; serialize it with [`Tree::to_views`] as often as needed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tree {
    roots: IndexMap<String, Node>,
}

impl Tree {
    /// Build a tree from typed documents.
    ///
    /// Documents whose path has no segments are skipped (the site root when
    /// `include_root` is `false`).
    #[must_use]
    pub fn from_documents<'a, I>(documents: I, include_root: bool) -> Self
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let mut builder = TreeBuilder::new(include_root);
        for doc in documents {
            builder.insert(doc);
        }
        builder.build()
    }

    /// Build a tree from loose records.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidDocument`] for the first record that fails
    /// validation. No tree is returned in that case.
    pub fn from_records(records: &[Value], include_root: bool) -> Result<Self, TreeError> {
        let mut builder = TreeBuilder::new(include_root);
        for (index, record) in records.iter().enumerate() {
            builder.insert_record(index, record)?;
        }
        Ok(builder.build())
    }

    /// Top-level nodes keyed by segment.
    #[must_use]
    pub fn roots(&self) -> &IndexMap<String, Node> {
        &self.roots
    }

    /// Node reached by following `segments` from the top level.
    #[must_use]
    pub fn get<S: AsRef<str>>(&self, segments: &[S]) -> Option<&Node> {
        let (first, rest) = segments.split_first()?;
        let mut node = self.roots.get(first.as_ref())?;
        for segment in rest {
            node = node.child(segment.as_ref())?;
        }
        Some(node)
    }

    /// Whether no document contributed a node.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// Counters collected while building a tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Documents that set an entry.
    pub inserted: usize,
    /// Documents skipped because their path had no segments.
    pub skipped: usize,
    /// Insertions that replaced an earlier entry at the same path.
    pub overwritten: usize,
}

/// Incremental tree builder.
///
/// Each insertion is isolated: a record that fails validation leaves the
/// nodes created by earlier insertions untouched.
#[derive(Debug)]
pub struct TreeBuilder {
    include_root: bool,
    roots: IndexMap<String, Node>,
    stats: BuildStats,
}

impl TreeBuilder {
    /// Create an empty builder.
    ///
    /// With `include_root`, every path is placed below a synthetic
    /// [`ROOT_SEGMENT`] node, and the site root document (`/`) lands on it.
    #[must_use]
    pub fn new(include_root: bool) -> Self {
        Self {
            include_root,
            roots: IndexMap::new(),
            stats: BuildStats::default(),
        }
    }

    /// Insert a document.
    ///
    /// Returns `false` if the document was skipped because its path has no
    /// segments.
    pub fn insert(&mut self, doc: &Document) -> bool {
        let mut segments = path_segments(&doc.url);
        if self.include_root {
            segments.insert(0, ROOT_SEGMENT.to_owned());
        }

        let Some((last, parents)) = segments.split_last() else {
            self.stats.skipped += 1;
            return false;
        };

        let mut level = &mut self.roots;
        for segment in parents {
            level = &mut level.entry(segment.clone()).or_default().children;
        }

        let node = level.entry(last.clone()).or_default();
        if node.entry.replace(Entry::from(doc)).is_some() {
            self.stats.overwritten += 1;
        }
        self.stats.inserted += 1;
        true
    }

    /// Validate a loose record and insert it.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidDocument`] if the record is invalid; the
    /// builder is left unchanged.
    pub fn insert_record(&mut self, index: usize, record: &Value) -> Result<bool, TreeError> {
        let doc = Document::from_value(index, record)?;
        Ok(self.insert(&doc))
    }

    /// Counters for the insertions so far.
    #[must_use]
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Tree {
        Tree { roots: self.roots }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn doc(url: &str, title: &str) -> Document {
        Document::new(url).with_title(title)
    }

    fn title_at(tree: &Tree, segments: &[&str]) -> Option<String> {
        tree.get(segments)?.entry()?.title.clone()
    }

    #[test]
    fn test_empty_input_builds_empty_tree() {
        let tree = Tree::from_documents(&Vec::<Document>::new(), false);

        assert!(tree.is_empty());
    }

    #[test]
    fn test_nested_path_creates_intermediate_nodes() {
        let tree = Tree::from_documents(&[doc("/a/b/c/", "C")], false);

        let a = tree.get(&["a"]).unwrap();
        assert!(a.entry().is_none());
        assert!(tree.get(&["a", "b"]).unwrap().entry().is_none());
        assert_eq!(title_at(&tree, &["a", "b", "c"]), Some("C".to_owned()));
    }

    #[test]
    fn test_node_can_be_entry_and_parent() {
        let tree = Tree::from_documents(
            &[doc("/about", "About"), doc("/about/team", "Team")],
            false,
        );

        let about = tree.get(&["about"]).unwrap();
        assert_eq!(about.entry().unwrap().url, "/about");
        assert_eq!(about.children().len(), 1);
        assert_eq!(title_at(&tree, &["about", "team"]), Some("Team".to_owned()));
    }

    #[test]
    fn test_intermediate_node_filled_by_later_document() {
        let tree = Tree::from_documents(
            &[doc("/docs/api/", "API"), doc("/docs/", "Docs")],
            false,
        );

        let docs = tree.get(&["docs"]).unwrap();
        assert_eq!(docs.entry().unwrap().title.as_deref(), Some("Docs"));
        assert!(docs.child("api").is_some());
    }

    #[test]
    fn test_entry_uses_menu_over_title() {
        let tree = Tree::from_documents(
            &[Document::new("/guide").with_title("The Guide").with_menu("Guide")],
            false,
        );

        assert_eq!(title_at(&tree, &["guide"]), Some("Guide".to_owned()));
    }

    #[test]
    fn test_entry_copies_order_and_hidden() {
        let tree = Tree::from_documents(&[Document::new("/x").with_order(4.0).hidden()], false);

        let entry = tree.get(&["x"]).unwrap().entry().unwrap();
        assert_eq!(entry.order, 4.0);
        assert!(entry.hidden);
    }

    #[test]
    fn test_entry_normalizes_non_finite_order() {
        let docs = vec![
            Document::new("/nan").with_order(f64::NAN),
            Document::new("/inf").with_order(f64::NEG_INFINITY),
            Document::new("/neg-zero").with_order(-0.0),
        ];
        let tree = Tree::from_documents(&docs, false);

        for segment in ["nan", "inf", "neg-zero"] {
            let order = tree.get(&[segment]).unwrap().order();
            assert!(order.is_sign_positive() && order == 0.0, "{segment}: {order}");
        }
    }

    #[test]
    fn test_root_document_skipped_without_include_root() {
        let mut builder = TreeBuilder::new(false);

        let inserted = builder.insert(&doc("/", "Home"));

        assert!(!inserted);
        assert_eq!(builder.stats().skipped, 1);
        assert!(builder.build().is_empty());
    }

    #[test]
    fn test_include_root_nests_under_root_segment() {
        let tree = Tree::from_documents(&[doc("/", "Home"), doc("/guide/", "Guide")], true);

        assert_eq!(tree.roots().len(), 1);
        assert_eq!(title_at(&tree, &[ROOT_SEGMENT]), Some("Home".to_owned()));
        assert_eq!(
            title_at(&tree, &[ROOT_SEGMENT, "guide"]),
            Some("Guide".to_owned())
        );
    }

    #[test]
    fn test_collision_last_write_wins() {
        let mut builder = TreeBuilder::new(false);
        builder.insert(&doc("/guide/", "First"));
        builder.insert(&doc("/guide/child", "Child"));
        builder.insert(&doc("/guide/index.html", "Second"));

        assert_eq!(builder.stats().overwritten, 1);
        let tree = builder.build();
        let guide = tree.get(&["guide"]).unwrap();
        assert_eq!(guide.entry().unwrap().title.as_deref(), Some("Second"));
        assert_eq!(guide.entry().unwrap().url, "/guide/index.html");
        assert!(guide.child("child").is_some());
    }

    #[test]
    fn test_collision_does_not_touch_other_nodes() {
        let tree = Tree::from_documents(
            &[doc("/a/b", "B"), doc("/a/c", "C1"), doc("/a/c/", "C2")],
            false,
        );

        assert_eq!(title_at(&tree, &["a", "b"]), Some("B".to_owned()));
        assert_eq!(title_at(&tree, &["a", "c"]), Some("C2".to_owned()));
    }

    #[test]
    fn test_children_keep_first_insertion_order() {
        let tree = Tree::from_documents(
            &[doc("/s/zeta", "Z"), doc("/s/alpha", "A"), doc("/s/zeta/", "Z2")],
            false,
        );

        let keys: Vec<_> = tree.get(&["s"]).unwrap().children().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta".to_owned(), "alpha".to_owned()]);
    }

    #[test]
    fn test_get_empty_segments_returns_none() {
        let tree = Tree::from_documents(&[doc("/a", "A")], false);

        assert!(tree.get::<&str>(&[]).is_none());
    }

    #[test]
    fn test_from_records_builds_tree() {
        let records = vec![
            json!({"url": "/a", "title": "A"}),
            json!({"url": "/a/b", "menu": "B"}),
        ];

        let tree = Tree::from_records(&records, false).unwrap();

        assert_eq!(title_at(&tree, &["a", "b"]), Some("B".to_owned()));
    }

    #[test]
    fn test_from_records_invalid_record_fails_call() {
        let records = vec![json!({"url": "/a"}), json!({"title": "no url"})];

        let err = Tree::from_records(&records, false).unwrap_err();

        assert!(matches!(err, TreeError::InvalidDocument { index: 1, .. }));
    }

    #[test]
    fn test_insert_record_failure_keeps_previous_nodes() {
        let mut builder = TreeBuilder::new(false);
        builder.insert_record(0, &json!({"url": "/a", "title": "A"})).unwrap();

        let result = builder.insert_record(1, &json!({"url": "/a", "order": "bad"}));

        assert!(result.is_err());
        assert_eq!(builder.stats().inserted, 1);
        let tree = builder.build();
        assert_eq!(title_at(&tree, &["a"]), Some("A".to_owned()));
    }
}
