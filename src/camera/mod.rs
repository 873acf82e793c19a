//! Camera system for 3D point-cloud viewing.
//!
//! Provides a perspective camera and an orbit controller driven by
//! platform-agnostic input events.

/// Orbit controller: drag-rotate, wheel-zoom, key nudges, bird's-eye.
pub mod controller;
/// Core camera struct and projection matrix.
pub mod core;

pub use controller::{OrbitController, OrbitDirection};
pub use self::core::Camera;
