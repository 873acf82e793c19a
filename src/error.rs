//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the pointsprite crate.
#[derive(Debug)]
pub enum SpriteError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// WGSL composition or validation failure.
    Shader(String),
    /// Uniform block could not be encoded into its std140 layout.
    Uniform(String),
    /// Failed to parse or load a point cloud file.
    PointLoad(String),
    /// Texture readback failed (mapping, polling, or unsupported format).
    Readback(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for SpriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Shader(msg) => write!(f, "shader error: {msg}"),
            Self::Uniform(msg) => write!(f, "uniform encoding error: {msg}"),
            Self::PointLoad(msg) => {
                write!(f, "point cloud load error: {msg}")
            }
            Self::Readback(msg) => write!(f, "readback error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for SpriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for SpriteError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for SpriteError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<encase::internal::Error> for SpriteError {
    fn from(e: encase::internal::Error) -> Self {
        Self::Uniform(e.to_string())
    }
}
