//! Point-sprite quad expansion and fill.
//!
//! The GPU pipeline evaluates these exact steps in
//! `assets/shaders/modules/sprite.wgsl`; the Rust versions here are the
//! device-free reference used by tests and benchmarks.

/// Uniform configuration shared by every sprite in a draw.
pub mod config;
/// The six-entry corner table and its triangle view.
pub mod corner;
/// Per-vertex clip-space expansion and screen-space helpers.
pub mod expand;
/// Constant fragment color.
pub mod fill;
/// Per-instance vertex buffer record.
pub mod instance;

pub use config::{SpriteConfig, SpriteUniform};
pub use corner::{corner_offset, corner_triangles, CORNER_OFFSETS, VERTICES_PER_SPRITE};
pub use expand::{
    clip_position, displacement, expand_instance, expand_instances,
    expand_vertex, ndc_to_pixel, pixel_bounds, to_ndc, PixelRect,
};
pub use fill::{fill, FILL_COLOR};
pub use instance::PointInstance;
