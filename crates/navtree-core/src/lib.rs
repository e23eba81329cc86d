//! Navigation trees from URL-tagged documents.
//!
//! This crate provides:
//! - [`canonical_path`] and [`path_segments`]: URL normalization
//! - [`Tree`] and [`TreeBuilder`]: nesting documents by path segment
//! - [`NodeView`]: ordered, filtered, context-annotated output for menus
//! - [`TreeHelper`] and [`tree()`]: the template-facing entry point over a
//!   host [`CollectionResolver`]
//!
//! # Quick Start
//!
//! ```
//! use navtree_core::{Document, Tree};
//!
//! let docs = vec![
//!     Document::new("/").with_title("Home"),
//!     Document::new("/guide/").with_title("Guide").with_order(1.0),
//!     Document::new("/guide/install/").with_title("Install"),
//!     Document::new("/api/").with_menu("API").with_order(2.0),
//! ];
//!
//! let tree = Tree::from_documents(&docs, false);
//! let nav = tree.to_views(Some(&Document::new("/guide/install/")));
//!
//! assert_eq!(nav.len(), 2);
//! assert_eq!(nav[0].title.as_deref(), Some("Guide"));
//! assert_eq!(nav[0].active, Some(true));
//! assert_eq!(nav[0].children[0].current, Some(true));
//! ```

mod collection;
mod document;
mod error;
mod helper;
mod path;
mod tree;
mod view;

pub use collection::{
    CollectionRef, CollectionResolver, DEFAULT_COLLECTION, MemoryCollections, collection_records,
};
pub use document::Document;
pub use error::TreeError;
pub use helper::{TreeHelper, tree};
pub use path::{canonical_path, path_segments};
pub use tree::{BuildStats, Entry, Node, ROOT_SEGMENT, Tree, TreeBuilder};
pub use view::NodeView;
