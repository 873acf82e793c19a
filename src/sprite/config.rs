use encase::{ShaderType, UniformBuffer};
use glam::{Mat4, Vec2};

use crate::error::SpriteError;

/// Read-only state broadcast to every sprite in a draw.
///
/// Preconditions (checked by [`debug_validate`](Self::debug_validate) in
/// debug builds only): both `resolution` components are positive and
/// `size` is finite. A zero resolution yields infinite or NaN corners;
/// `size == 0` is a legal invisible sprite and a negative `size` mirrors
/// the quad through its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteConfig {
    /// Combined view-projection matrix.
    pub camera: Mat4,
    /// Viewport size in pixels.
    pub resolution: Vec2,
    /// Sprite edge length in pixels.
    pub size: f32,
}

impl SpriteConfig {
    /// Bundle a camera matrix, viewport size, and pixel size.
    #[must_use]
    pub fn new(camera: Mat4, resolution: Vec2, size: f32) -> Self {
        Self {
            camera,
            resolution,
            size,
        }
    }

    /// Half-extent of a sprite in NDC units before the `clip.w` scale.
    ///
    /// NDC spans two units across the viewport, so a corner offset of ±1
    /// scaled by `size / resolution` moves `size / 2` pixels each way.
    #[inline]
    #[must_use]
    pub fn pixel_extent(&self) -> Vec2 {
        self.size / self.resolution
    }

    /// Assert the configuration preconditions. No-op in release builds.
    pub fn debug_validate(&self) {
        debug_assert!(
            self.resolution.x > 0.0 && self.resolution.y > 0.0,
            "sprite resolution must be positive, got {}",
            self.resolution
        );
        debug_assert!(
            self.size.is_finite(),
            "sprite size must be finite, got {}",
            self.size
        );
        debug_assert!(
            self.camera.is_finite(),
            "sprite camera matrix has non-finite entries"
        );
    }

    /// The GPU-side view of this configuration.
    #[must_use]
    pub fn uniform(&self) -> SpriteUniform {
        SpriteUniform {
            camera: self.camera,
            resolution: self.resolution,
            size: self.size,
        }
    }

    /// Encode into std140 uniform bytes, padding included.
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::Uniform`] if encase cannot lay out the block.
    pub fn to_uniform_bytes(&self) -> Result<Vec<u8>, SpriteError> {
        let mut buffer = UniformBuffer::new(Vec::<u8>::new());
        buffer.write(&self.uniform())?;
        Ok(buffer.into_inner())
    }
}

/// Uniform block bound at `@group(0) @binding(0)`.
///
/// Field order and types must match `SpriteConfig` in
/// `assets/shaders/modules/sprite.wgsl`. The derive inserts the trailing
/// padding that rounds the 76 bytes of payload up to the 16-byte uniform
/// struct alignment.
#[derive(Debug, Clone, Copy, PartialEq, ShaderType)]
pub struct SpriteUniform {
    /// Column-major view-projection matrix.
    pub camera: Mat4,
    /// Viewport size in pixels.
    pub resolution: Vec2,
    /// Sprite edge length in pixels.
    pub size: f32,
}
