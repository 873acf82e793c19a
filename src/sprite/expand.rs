//! Quad expansion: one world-space point plus a corner index in, one
//! clip-space vertex out.
//!
//! The perspective divide scales clip `x`/`y` by `1 / w`. Multiplying the
//! corner displacement by `clip.w` up front cancels that division, so every
//! sprite lands on screen as a `size`-pixel square regardless of depth.
//! The displacement never touches `z` or `w`: all corners keep the point's
//! depth and the quad stays screen-aligned.

use glam::{Vec2, Vec3, Vec3Swizzles, Vec4, Vec4Swizzles};

use super::{
    config::SpriteConfig,
    corner::{corner_offset, CORNER_OFFSETS, VERTICES_PER_SPRITE},
};

/// Project a world-space point into clip space.
#[inline]
#[must_use]
pub fn clip_position(position: Vec3, config: &SpriteConfig) -> Vec4 {
    config.camera * position.extend(1.0)
}

/// Clip-space offset that becomes `offset * size / resolution` in NDC
/// after the perspective divide.
///
/// A `clip.w` of zero collapses the displacement to zero, leaving a
/// degenerate sprite at the point's own clip position.
#[inline]
#[must_use]
pub fn displacement(clip: Vec4, offset: Vec2, config: &SpriteConfig) -> Vec4 {
    (offset * config.pixel_extent() * clip.w).extend(0.0).extend(0.0)
}

/// Clip-space position of corner `vertex_index` (0..6) of the sprite at
/// `position`.
#[inline]
#[must_use]
pub fn expand_vertex(
    position: Vec3,
    vertex_index: u32,
    config: &SpriteConfig,
) -> Vec4 {
    let offset = corner_offset(vertex_index);
    let clip = clip_position(position, config);
    clip + displacement(clip, offset, config)
}

/// All six triangle-list vertices of one sprite.
#[must_use]
pub fn expand_instance(position: Vec3, config: &SpriteConfig) -> [Vec4; 6] {
    let clip = clip_position(position, config);
    CORNER_OFFSETS.map(|offset| clip + displacement(clip, offset, config))
}

/// Expand every point in draw order: instance-major, corner-minor, six
/// vertices per point.
#[must_use]
pub fn expand_instances(positions: &[Vec3], config: &SpriteConfig) -> Vec<Vec4> {
    config.debug_validate();
    let mut out =
        Vec::with_capacity(positions.len() * VERTICES_PER_SPRITE as usize);
    for &position in positions {
        out.extend(expand_instance(position, config));
    }
    out
}

/// Perspective divide. `None` when `w` is zero.
#[inline]
#[must_use]
pub fn to_ndc(clip: Vec4) -> Option<Vec3> {
    (clip.w != 0.0).then(|| clip.xyz() / clip.w)
}

/// Map NDC `x`/`y` to pixel coordinates (origin top-left, `+y` down).
#[inline]
#[must_use]
pub fn ndc_to_pixel(ndc: Vec2, resolution: Vec2) -> Vec2 {
    Vec2::new(
        (ndc.x + 1.0) * 0.5 * resolution.x,
        (1.0 - ndc.y) * 0.5 * resolution.y,
    )
}

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    /// Top-left corner in pixels.
    pub min: Vec2,
    /// Bottom-right corner in pixels.
    pub max: Vec2,
}

impl PixelRect {
    /// Horizontal extent in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Vertical extent in pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Midpoint of the rectangle.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Whether the two rectangles share any area.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Screen-space bounding rectangle of a set of clip-space vertices.
///
/// Returns `None` for an empty slice or when any vertex has `w == 0`.
#[must_use]
pub fn pixel_bounds(corners: &[Vec4], resolution: Vec2) -> Option<PixelRect> {
    let mut pixels = corners
        .iter()
        .map(|&c| to_ndc(c).map(|ndc| ndc_to_pixel(ndc.xy(), resolution)));
    let first = pixels.next()??;
    pixels.try_fold(
        PixelRect {
            min: first,
            max: first,
        },
        |rect, p| {
            let p = p?;
            Some(PixelRect {
                min: rect.min.min(p),
                max: rect.max.max(p),
            })
        },
    )
}
