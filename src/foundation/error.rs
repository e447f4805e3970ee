/// Convenience result type used across flyerpress.
pub type FlyerResult<T> = Result<T, FlyerError>;

/// Top-level error taxonomy used by the rasterization and export APIs.
///
/// Malformed show data is never an error: the normalizer and mapper always produce a
/// best-effort value. Errors only come from invalid options, resource failures while
/// rendering, and archive or sink IO.
#[derive(thiserror::Error, Debug)]
pub enum FlyerError {
    /// Invalid caller-provided options (sizes, config values).
    #[error("validation error: {0}")]
    Validation(String),

    /// Failures while staging or rasterizing a flyer (logo load, svg parse, allocation).
    #[error("render error: {0}")]
    Render(String),

    /// Failures while assembling or serializing a batch archive.
    #[error("archive error: {0}")]
    Archive(String),

    /// Errors when serializing or deserializing show records or config.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FlyerError {
    /// Build a [`FlyerError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FlyerError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`FlyerError::Archive`] value.
    pub fn archive(msg: impl Into<String>) -> Self {
        Self::Archive(msg.into())
    }

    /// Build a [`FlyerError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
