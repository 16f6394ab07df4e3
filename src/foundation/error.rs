/// Convenience result type used across Vexel.
pub type VexelResult<T> = Result<T, VexelError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum VexelError {
    /// An authored rectangle or index exceeds the bounds of its backing resource.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// A caller supplied a malformed argument (non-positive scale, mismatched
    /// delta array lengths, and similar contract violations).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VexelError {
    /// Build a [`VexelError::OutOfRange`] value.
    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRange(msg.into())
    }

    /// Build a [`VexelError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
