//! The `tree` template helper.
//!
//! Hosts register [`TreeHelper`] under [`TreeHelper::NAME`] in their
//! templating context. Each call resolves a collection, builds a fresh
//! [`Tree`] from it and renders navigation for the current page.

use serde_json::Value;

use crate::collection::{CollectionRef, CollectionResolver, collection_records};
use crate::document::{Document, record_url, type_name};
use crate::error::TreeError;
use crate::tree::{Tree, TreeBuilder};
use crate::view::NodeView;

/// Build navigation for a collection.
///
/// - `collection`: name or value, `None` for [`DEFAULT_COLLECTION`](crate::DEFAULT_COLLECTION)
/// - `context`: record of the page being rendered, used for `active`/`current`
/// - `include_root`: keep the site root as a top-level `"/"` item
///
/// Nothing is cached between calls.
///
/// # Errors
///
/// Fails without output if the collection cannot be resolved, is not an
/// array, contains an invalid record, or the context has no string `url`.
pub fn tree(
    resolver: &impl CollectionResolver,
    collection: Option<CollectionRef>,
    context: Option<&Value>,
    include_root: bool,
) -> Result<Vec<NodeView>, TreeError> {
    let collection = collection.unwrap_or_default();
    let name = match &collection {
        CollectionRef::Named(name) => Some(name.clone()),
        CollectionRef::Resolved(_) => None,
    };
    let value = collection.load(resolver)?;
    let records = collection_records(&value)?;

    let context = context.map(parse_context).transpose()?.flatten();

    let mut builder = TreeBuilder::new(include_root);
    for (index, record) in records.iter().enumerate() {
        builder.insert_record(index, record)?;
    }
    let stats = builder.stats();
    let tree: Tree = builder.build();

    tracing::debug!(
        collection = name.as_deref().unwrap_or("<inline>"),
        records = records.len(),
        inserted = stats.inserted,
        skipped = stats.skipped,
        overwritten = stats.overwritten,
        "Built navigation tree"
    );
    if stats.overwritten > 0 {
        tracing::debug!(
            overwritten = stats.overwritten,
            "Documents shared a path, later entries replaced earlier ones"
        );
    }

    Ok(tree.to_views(context.as_ref()))
}

/// Read the context record. Only `url` is used; `null` means no context.
fn parse_context(value: &Value) -> Result<Option<Document>, TreeError> {
    let record = match value {
        Value::Null => return Ok(None),
        Value::Object(record) => record,
        other => {
            return Err(TreeError::InvalidContext(format!(
                "expected an object, got {}",
                type_name(other)
            )));
        }
    };
    let url = record_url(record).map_err(TreeError::InvalidContext)?;
    Ok(Some(Document::new(url)))
}

/// Template helper bound to a collection resolver.
///
/// # Example
///
/// ```
/// use navtree_core::{MemoryCollections, TreeHelper};
/// use serde_json::json;
///
/// let collections = MemoryCollections::new().with_collection(
///     "documents",
///     vec![
///         json!({"url": "/", "title": "Home"}),
///         json!({"url": "/guide/", "title": "Guide", "order": 1}),
///     ],
/// );
/// let helper = TreeHelper::new(collections);
///
/// let nav = helper.call(None, Some(&json!({"url": "/guide/"})), false).unwrap();
/// assert_eq!(nav.len(), 1);
/// assert_eq!(nav[0].current, Some(true));
/// ```
#[derive(Debug)]
pub struct TreeHelper<R> {
    resolver: R,
}

impl<R: CollectionResolver> TreeHelper<R> {
    /// Name under which the helper is exposed to templates.
    pub const NAME: &'static str = "tree";

    /// Create a helper over `resolver`.
    #[must_use]
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// Resolver used for named collections.
    #[must_use]
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Invoke the helper. See [`tree`].
    ///
    /// # Errors
    ///
    /// Same as [`tree`].
    pub fn call(
        &self,
        collection: Option<CollectionRef>,
        context: Option<&Value>,
        include_root: bool,
    ) -> Result<Vec<NodeView>, TreeError> {
        tree(&self.resolver, collection, context, include_root)
    }

    /// Invoke the helper with loosely typed template arguments.
    ///
    /// `collection` follows [`CollectionRef::from_value`]; `include_root`
    /// uses template truthiness and defaults to `false` when absent.
    ///
    /// # Errors
    ///
    /// Same as [`tree`].
    pub fn call_with_args(&self, args: &[Value]) -> Result<Vec<NodeView>, TreeError> {
        let collection = args.first().cloned().map(CollectionRef::from_value);
        let context = args.get(1);
        let include_root = args.get(2).is_some_and(is_truthy);
        self.call(collection, context, include_root)
    }
}

/// Template truthiness: `null`, `false`, `0`, `""` are false.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
