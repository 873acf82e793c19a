use glam::{Mat4, Vec2, Vec3};

use crate::{
    camera::core::Camera,
    input::{InputEvent, MouseButton},
    options::CameraOptions,
};

/// Initial eye position: looking down at the unit cube from a corner.
const DEFAULT_EYE: Vec3 = Vec3::new(0.5, 0.5, 0.5);
/// Initial look-at target.
const DEFAULT_TARGET: Vec3 = Vec3::ZERO;
/// World up axis; clouds are z-up.
const DEFAULT_UP: Vec3 = Vec3::Z;
/// Upward pull used by the bird's-eye preset, in drag-delta units after
/// the rotate-speed scale.
const BIRD_EYE_PULL: f32 = 1e4;
/// Closest the eye may zoom to the target.
const MIN_DISTANCE: f32 = 1e-3;
/// Smallest angle, in radians, between the eye direction and the up axis.
/// `look_at` has no side vector when the two are parallel.
const MIN_POLAR_ANGLE: f32 = 1e-3;

/// Direction of a keyboard orbit nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitDirection {
    /// Orbit toward screen-left.
    Left,
    /// Orbit toward screen-right.
    Right,
    /// Orbit upward.
    Up,
    /// Orbit downward.
    Down,
}

impl OrbitDirection {
    fn delta(self) -> Vec2 {
        match self {
            Self::Left => Vec2::NEG_X,
            Self::Right => Vec2::X,
            Self::Up => Vec2::NEG_Y,
            Self::Down => Vec2::Y,
        }
    }
}

/// Right-button drag progress.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    /// Button down, waiting for the first cursor position.
    Armed,
    /// Rotating relative to where the drag started.
    Dragging { origin: Vec2 },
}

/// Orbit camera controller.
///
/// Right-drag rotates the eye around the target proportionally to the
/// cursor's offset from where the drag began, so holding the cursor away
/// from the origin keeps orbiting. The wheel dollies along the view
/// direction. Any move that would put the eye at or below the `z = 0`
/// ground plane is rejected.
pub struct OrbitController {
    /// The controlled camera.
    pub camera: Camera,
    drag: DragState,
    rotate_speed: f32,
    zoom_speed: f32,
    nudge_step: f32,
}

impl OrbitController {
    /// Controller at the default viewpoint.
    #[must_use]
    pub fn new(aspect: f32, options: &CameraOptions) -> Self {
        Self {
            camera: Camera::new(
                DEFAULT_EYE,
                DEFAULT_TARGET,
                DEFAULT_UP,
                aspect,
                options,
            ),
            drag: DragState::Idle,
            rotate_speed: options.rotate_speed,
            zoom_speed: options.zoom_speed,
            nudge_step: options.nudge_step,
        }
    }

    /// Re-read projection and speed settings, keeping the viewpoint.
    pub fn apply_options(&mut self, options: &CameraOptions) {
        self.camera.fovy = options.fovy;
        self.camera.znear = options.znear;
        self.camera.zfar = options.zfar;
        self.rotate_speed = options.rotate_speed;
        self.zoom_speed = options.zoom_speed;
        self.nudge_step = options.nudge_step;
    }

    /// Feed one input event. Returns `true` if the camera consumed it.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::MouseButton {
                button: MouseButton::Right,
                pressed,
            } => {
                self.drag = if pressed {
                    DragState::Armed
                } else {
                    DragState::Idle
                };
                true
            }
            InputEvent::CursorMoved { x, y } => {
                let position = Vec2::new(x, y);
                match self.drag {
                    DragState::Idle => false,
                    DragState::Armed => {
                        self.drag = DragState::Dragging { origin: position };
                        true
                    }
                    DragState::Dragging { origin } => {
                        self.rotate(position - origin);
                        true
                    }
                }
            }
            InputEvent::Scroll { delta } => {
                self.zoom(delta);
                true
            }
            InputEvent::MouseButton { .. } => false,
        }
    }

    /// Orbit the eye around the target by a cursor-space delta.
    pub fn rotate(&mut self, delta: Vec2) {
        self.orbit(delta * self.rotate_speed);
    }

    /// Dolly toward (positive) or away from (negative) the target.
    pub fn zoom(&mut self, amount: f32) {
        let forward = self.camera.forward();
        let eye = self.camera.eye + forward.normalize() * amount * self.zoom_speed;

        let remaining = (self.camera.target - eye).dot(forward.normalize());
        if eye.z > 0.0 && remaining > MIN_DISTANCE {
            self.camera.eye = eye;
        }
    }

    /// Single keyboard orbit step.
    pub fn nudge(&mut self, direction: OrbitDirection) {
        self.rotate(direction.delta() * self.nudge_step);
    }

    /// Swing the eye to look straight down the up axis at the target.
    pub fn bird_eye(&mut self) {
        self.orbit(Vec2::new(0.0, -BIRD_EYE_PULL));
    }

    /// Return to the default viewpoint.
    pub fn reset(&mut self) {
        self.camera.eye = DEFAULT_EYE;
        self.camera.target = DEFAULT_TARGET;
        self.camera.up = DEFAULT_UP;
        self.drag = DragState::Idle;
    }

    /// Update the projection aspect ratio after a resize.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.aspect = aspect;
    }

    /// Current view-projection matrix.
    pub fn view_proj(&self) -> Mat4 {
        self.camera.build_matrix()
    }

    /// Whether a right-button drag is in progress.
    pub fn is_dragging(&self) -> bool {
        !matches!(self.drag, DragState::Idle)
    }

    /// Move the eye on the sphere around the target. `offset` is already
    /// scaled into view-space units.
    fn orbit(&mut self, offset: Vec2) {
        let forward = self.camera.forward();
        let distance = forward.length();
        let up = self.camera.up.normalize();
        let side = forward.cross(up);
        if side.length() <= distance * 1e-6 {
            return;
        }
        let right = side.normalize();

        let direction = (forward + right * offset.x + up * offset.y).normalize();
        let Some(toward_eye) =
            clamp_polar(-direction, up, self.camera.eye - self.camera.target)
        else {
            return;
        };
        let eye = self.camera.target + toward_eye * distance;

        if eye.z > 0.0 && eye.is_finite() {
            self.camera.eye = eye;
        }
    }
}

/// Pull the unit vector `toward_eye` at least [`MIN_POLAR_ANGLE`] away from
/// `up`, keeping its azimuth. When `toward_eye` has no usable horizontal
/// part the azimuth of `current` is kept instead.
fn clamp_polar(toward_eye: Vec3, up: Vec3, current: Vec3) -> Option<Vec3> {
    let (sin_min, cos_min) = MIN_POLAR_ANGLE.sin_cos();
    let height = toward_eye.dot(up);
    if height <= cos_min {
        return Some(toward_eye);
    }

    let horizontal = toward_eye - up * height;
    let horizontal = if horizontal.length() > 1e-6 {
        horizontal.normalize()
    } else {
        (current - up * current.dot(up)).try_normalize()?
    };
    Some(up * cos_min + horizontal * sin_min)
}
