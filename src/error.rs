//! Crate-wide error type. Each variant names the pipeline stage that
//! rejected its input, so a failure in a composed scene points at scene
//! construction, track data, tree evaluation, or rasterization directly.

pub type GardenResult<T> = Result<T, GardenError>;

#[derive(thiserror::Error, Debug)]
pub enum GardenError {
    /// Structurally invalid input: viewport dimensions, path data, fonts.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed timeline or track descriptors.
    #[error("animation error: {0}")]
    Animation(String),

    /// A node rejected while resolving a frame; the message names it.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Rasterization failures (canvas limits, backend errors).
    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GardenError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}
