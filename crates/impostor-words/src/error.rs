//! Error types for the word catalog.

/// Errors that can occur while building or loading a [`Catalog`](crate::Catalog).
#[derive(Debug, thiserror::Error)]
pub enum WordsError {
    /// The catalog JSON could not be parsed.
    #[cfg(feature = "json")]
    #[error("catalog decode failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Two categories share the same name.
    #[error("duplicate category {0:?}")]
    DuplicateCategory(String),

    /// A category name is empty or collides with the random sentinel.
    #[error("invalid category name {0:?}")]
    InvalidCategoryName(String),

    /// No category contains a single word, so no round could ever start.
    #[error("catalog contains no words")]
    EmptyCatalog,
}
