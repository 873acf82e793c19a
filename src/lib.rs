// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Constant-pixel-size point sprites on wgpu.
//!
//! Every point of a cloud is drawn as a screen-aligned square whose edge is
//! a fixed number of pixels no matter how far the point sits from the
//! camera. Instead of native point primitives, each point is expanded into
//! two triangles in the vertex stage: the clip-space corner offsets are
//! pre-multiplied by `clip.w`, so the perspective divide leaves a constant
//! pixel footprint.
//!
//! # Key entry points
//!
//! - [`sprite`] - the expansion and fill math, usable without a GPU
//! - [`engine::SpriteEngine`] - owns the device, camera, and sprite pass
//! - [`points::PointCloud`] - loads `.pcd` / `.xyz` clouds
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! The numeric core in [`sprite`] is a pure function of one point, one
//! corner index, and an immutable [`sprite::SpriteConfig`]. The WGSL module
//! in `assets/shaders/modules/sprite.wgsl` runs the same arithmetic on the
//! GPU; [`renderer::sprite_pass::SpritePass`] issues one
//! `draw(0..6, 0..point_count)` call per frame.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod points;
pub mod renderer;
pub mod sprite;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::SpriteEngine;
pub use error::SpriteError;
pub use input::{InputEvent, KeyAction, MouseButton};
pub use options::Options;
pub use points::PointCloud;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
