use glam::Vec4;

/// Opaque yellow, normalized RGBA.
///
/// Must match `FILL_COLOR` in `assets/shaders/modules/sprite.wgsl`.
pub const FILL_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 1.0];

/// Fragment color for any sprite fragment. The interpolated position is
/// accepted for signature parity with the shader and otherwise ignored.
#[inline]
#[must_use]
pub fn fill(_clip: Vec4) -> [f32; 4] {
    FILL_COLOR
}
