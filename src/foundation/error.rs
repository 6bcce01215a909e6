/// Convenience result type used across Lucent.
pub type LucentResult<T> = Result<T, LucentError>;

/// Top-level error taxonomy used by crate APIs.
///
/// Numeric and geometric inputs are clamped, never rejected; errors are
/// reserved for construction-time failures (surface allocation, backend
/// selection) and wrapped lower-level failures.
#[derive(thiserror::Error, Debug)]
pub enum LucentError {
    /// Invalid user-provided data that cannot be clamped into range.
    #[error("validation error: {0}")]
    Validation(String),

    /// Surface construction or pixel-buffer failures.
    #[error("surface error: {0}")]
    Surface(String),

    /// Backend creation or device failures.
    #[error("backend error: {0}")]
    Backend(String),

    /// Errors while configuring or driving animations.
    #[error("animation error: {0}")]
    Animation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LucentError {
    /// Build a [`LucentError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LucentError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`LucentError::Backend`] value.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Build a [`LucentError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
