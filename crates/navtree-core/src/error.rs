//! Error types for tree building.

/// Error returned when documents or collections cannot be turned into a tree.
///
/// Apart from [`TreeError::CollectionUnavailable`], which reports host
/// backend failures, all variants are permanent: the pipeline is
/// deterministic, so calling it again with the same input reproduces the
/// same error.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// A record is not a valid document.
    #[error("Invalid document at index {index}: {reason}")]
    InvalidDocument {
        /// Position of the record in its collection.
        index: usize,
        /// What is wrong with the record.
        reason: String,
    },
    /// The context record cannot be used for active-path detection.
    #[error("Invalid context: {0}")]
    InvalidContext(String),
    /// A collection value is not a sequence of records.
    #[error("Invalid collection: {0}")]
    InvalidCollection(String),
    /// The host does not know a collection with this name.
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),
    /// The host knows the collection but could not load it.
    #[error("Collection {name} could not be loaded: {reason}")]
    CollectionUnavailable {
        /// Collection name.
        name: String,
        /// Backend failure description.
        reason: String,
    },
}

impl TreeError {
    pub(crate) fn invalid_document(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidDocument {
            index,
            reason: reason.into(),
        }
    }
}
