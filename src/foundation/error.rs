/// Convenience result type used across Sheen.
pub type SheenResult<T> = Result<T, SheenError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Render entry points never surface these; they degrade to a skipped draw instead. Errors are
/// reported only by construction and configuration paths.
#[derive(thiserror::Error, Debug)]
pub enum SheenError {
    /// Invalid user-provided configuration or out-of-range key fields.
    #[error("validation error: {0}")]
    Validation(String),

    /// Slice geometry that does not fit its source raster.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Errors when parsing configuration documents.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SheenError {
    /// Build a [`SheenError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SheenError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`SheenError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
