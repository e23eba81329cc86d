//! Document collections supplied by the host.
//!
//! The host owns its documents and hands them over by name through a
//! [`CollectionResolver`]. A collection is any JSON value; it must be an
//! array of document records to be usable.

use std::collections::HashMap;

use serde_json::Value;

use crate::document::type_name;
use crate::error::TreeError;

/// Collection used when the caller does not name one.
pub const DEFAULT_COLLECTION: &str = "documents";

/// Lookup of named document collections.
pub trait CollectionResolver {
    /// Return the collection registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::CollectionNotFound`] if no such collection exists.
    /// Implementations may return other errors for backend failures.
    fn resolve(&self, name: &str) -> Result<Value, TreeError>;
}

impl<R: CollectionResolver + ?Sized> CollectionResolver for &R {
    fn resolve(&self, name: &str) -> Result<Value, TreeError> {
        (**self).resolve(name)
    }
}

/// Collection argument: a name to resolve or an already resolved value.
#[derive(Clone, Debug, PartialEq)]
pub enum CollectionRef {
    /// Resolve through the host.
    Named(String),
    /// Use as is.
    Resolved(Value),
}

impl CollectionRef {
    /// Interpret a template argument.
    ///
    /// Strings name a collection, `null` selects [`DEFAULT_COLLECTION`], and
    /// anything else is treated as the collection itself.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => Self::default(),
            Value::String(name) => Self::Named(name),
            other => Self::Resolved(other),
        }
    }

    /// Load the collection value.
    pub(crate) fn load(self, resolver: &impl CollectionResolver) -> Result<Value, TreeError> {
        match self {
            Self::Named(name) => resolver.resolve(&name),
            Self::Resolved(value) => Ok(value),
        }
    }
}

impl Default for CollectionRef {
    fn default() -> Self {
        Self::Named(DEFAULT_COLLECTION.to_owned())
    }
}

impl From<&str> for CollectionRef {
    fn from(name: &str) -> Self {
        Self::Named(name.to_owned())
    }
}

impl From<String> for CollectionRef {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

/// Borrow the records of a collection value.
///
/// # Errors
///
/// Returns [`TreeError::InvalidCollection`] unless `value` is an array.
pub fn collection_records(value: &Value) -> Result<&[Value], TreeError> {
    match value {
        Value::Array(records) => Ok(records),
        other => Err(TreeError::InvalidCollection(format!(
            "expected an array of documents, got {}",
            type_name(other)
        ))),
    }
}

/// In-memory collections keyed by name.
///
/// # Example
///
/// ```
/// use navtree_core::{CollectionResolver, MemoryCollections};
/// use serde_json::json;
///
/// let collections = MemoryCollections::new()
///     .with_collection("documents", vec![json!({"url": "/guide/"})]);
///
/// assert!(collections.resolve("documents").is_ok());
/// assert!(collections.resolve("posts").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryCollections {
    collections: HashMap<String, Value>,
}

impl MemoryCollections {
    /// Create an empty set of collections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collection of records.
    #[must_use]
    pub fn with_collection(mut self, name: impl Into<String>, records: Vec<Value>) -> Self {
        self.insert(name, Value::Array(records));
        self
    }

    /// Register a raw collection value, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.collections.insert(name.into(), value);
    }
}

impl CollectionResolver for MemoryCollections {
    fn resolve(&self, name: &str) -> Result<Value, TreeError> {
        self.collections
            .get(name)
            .cloned()
            .ok_or_else(|| TreeError::CollectionNotFound(name.to_owned()))
    }
}
