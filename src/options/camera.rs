use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and control parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Orbit angle per pixel of drag offset, per frame.
    #[schemars(title = "Rotate Speed", range(min = 0.00001, max = 0.001))]
    pub rotate_speed: f32,
    /// Dolly distance per scroll line.
    #[schemars(title = "Zoom Speed", range(min = 0.001, max = 0.1), extend("step" = 0.001))]
    pub zoom_speed: f32,
    /// Drag-equivalent pixels per keyboard orbit nudge.
    #[schemars(title = "Nudge Step", range(min = 10.0, max = 2000.0), extend("step" = 10.0))]
    pub nudge_step: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.01,
            zfar: 100.0,
            rotate_speed: 1e-4,
            zoom_speed: 0.01,
            nudge_step: 500.0,
        }
    }
}
