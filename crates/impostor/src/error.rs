//! Unified error type for the Impostor crates.

use impostor_session::SessionError;
use impostor_words::WordsError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant generates the `From` impl, so
/// `?` converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum ImpostorError {
    /// A session-level error (empty word pool, session gone).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A catalog error (malformed JSON, duplicate category, no words).
    #[error(transparent)]
    Words(#[from] WordsError),

    /// The tracing subscriber could not be installed.
    #[error("logging init failed: {0}")]
    Logging(String),
}
