/// Convenience result type used across inkwarp.
pub type InkwarpResult<T> = Result<T, InkwarpError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum InkwarpError {
    /// Invalid or missing user-provided parameters, detected before any rendering.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A render was requested with a degenerate (zero-area) image, field or viewport.
    #[error("render precondition violated: {0}")]
    Precondition(String),

    /// Unreadable input, unwritable output, or a frame sink that failed mid-stream.
    #[error("io error: {0}")]
    Io(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InkwarpError {
    /// Build an [`InkwarpError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build an [`InkwarpError::Precondition`] value.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Build an [`InkwarpError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Build an [`InkwarpError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for IO failures (unreadable input, broken sink).
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

impl From<std::io::Error> for InkwarpError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
