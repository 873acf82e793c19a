use glam::{Mat4, Vec3};

use crate::options::CameraOptions;

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Camera at `eye` looking at `target`, with projection parameters
    /// taken from `options`.
    #[must_use]
    pub fn new(
        eye: Vec3,
        target: Vec3,
        up: Vec3,
        aspect: f32,
        options: &CameraOptions,
    ) -> Self {
        Self {
            eye,
            target,
            up,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Build the combined view-projection matrix.
    pub fn build_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        let proj = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
        proj * view
    }

    /// Vector from the eye to the target (not normalized).
    pub fn forward(&self) -> Vec3 {
        self.target - self.eye
    }

    /// Distance from the eye to the target.
    pub fn distance(&self) -> f32 {
        self.forward().length()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4Swizzles;

    use super::*;

    fn camera() -> Camera {
        Camera::new(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::ZERO,
            Vec3::Y,
            1.0,
            &CameraOptions::default(),
        )
    }

    #[test]
    fn target_projects_to_screen_center() {
        let clip = camera().build_matrix() * Vec3::ZERO.extend(1.0);
        let ndc = clip.xyz() / clip.w;
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        assert!((0.0..=1.0).contains(&ndc.z));
    }

    #[test]
    fn clip_w_grows_with_distance() {
        let m = camera().build_matrix();
        let near = m * Vec3::new(0.0, 0.0, 5.0).extend(1.0);
        let far = m * Vec3::new(0.0, 0.0, -50.0).extend(1.0);
        assert!((near.w - 5.0).abs() < 1e-4);
        assert!((far.w - 60.0).abs() < 1e-3);
    }

    #[test]
    fn distance_matches_eye_target_gap() {
        assert_eq!(camera().distance(), 10.0);
    }
}
