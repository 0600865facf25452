/// Convenience result type used across postfx.
pub type PostfxResult<T> = Result<T, PostfxError>;

/// Top-level error taxonomy used by composer APIs.
///
/// The composer itself has almost no failure modes of its own: most errors it returns
/// are device or pass failures passed through unchanged via [`PostfxError::Other`].
#[derive(thiserror::Error, Debug)]
pub enum PostfxError {
    /// Invalid caller-provided input (e.g. an out-of-range insert index).
    #[error("validation error: {0}")]
    Validation(String),

    /// A precondition on composer state was violated (e.g. `bypass` on an empty chain).
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Wrapped lower-level error from a device or pass implementation.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PostfxError {
    /// Build a [`PostfxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PostfxError::InvalidState`] value.
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
