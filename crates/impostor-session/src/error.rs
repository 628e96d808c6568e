//! Error types for the session layer.

/// Errors that can occur while driving a session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The requested category resolved to no words at all.
    ///
    /// Non-fatal: the session stays in its previous phase with
    /// `is_loading = false`, and no round is started.
    #[error("no words available for category {0:?}")]
    EmptyWordPool(String),

    /// The session actor is gone (shut down, or its task ended).
    ///
    /// Using a handle after teardown is a programming error.
    #[error("session is unavailable")]
    Unavailable,
}
