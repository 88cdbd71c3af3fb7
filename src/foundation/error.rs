/// Convenience result type used across stardrift.
pub type StardriftResult<T> = Result<T, StardriftError>;

/// Top-level error taxonomy used by engine APIs.
///
/// None of these reach an end user as a hard failure: surface errors degrade a layer to
/// "renders nothing" and frame errors are absorbed at the frame boundary.
#[derive(thiserror::Error, Debug)]
pub enum StardriftError {
    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// A drawing surface could not be created or sized.
    #[error("surface error: {0}")]
    Surface(String),

    /// Transient failure inside a simulate/draw step.
    #[error("frame error: {0}")]
    Frame(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StardriftError {
    /// Build a [`StardriftError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StardriftError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`StardriftError::Frame`] value.
    pub fn frame(msg: impl Into<String>) -> Self {
        Self::Frame(msg.into())
    }

    /// Build a [`StardriftError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
