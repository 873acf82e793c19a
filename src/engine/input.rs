//! Input and key-action dispatch for [`SpriteEngine`].

use super::SpriteEngine;
use crate::{
    camera::OrbitDirection,
    input::{InputEvent, KeyAction},
};

impl SpriteEngine {
    /// Process a platform-agnostic input event.
    ///
    /// Right-drag orbits the camera and the wheel zooms. Returns `true` if
    /// the event changed or armed the camera.
    ///
    /// # Example
    ///
    /// ```ignore
    /// engine.handle_input(InputEvent::CursorMoved { x, y });
    /// engine.handle_input(InputEvent::Scroll { delta: 1.0 });
    /// ```
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        self.camera.handle_event(event)
    }

    /// Run the action bound to a key string (winit `KeyCode` debug name),
    /// if any. Returns `true` if a binding matched.
    pub fn handle_key(&mut self, key: &str) -> bool {
        match self.options.keybindings.lookup(key) {
            Some(action) => {
                log::debug!("key {key} -> {action:?}");
                action.execute(self);
                true
            }
            None => false,
        }
    }

    /// Run a single key action.
    pub fn execute(&mut self, action: KeyAction) {
        action.execute(self);
    }
}

impl KeyAction {
    /// Execute this action on the given engine.
    pub fn execute(self, engine: &mut SpriteEngine) {
        match self {
            Self::OrbitLeft => engine.camera.nudge(OrbitDirection::Left),
            Self::OrbitRight => engine.camera.nudge(OrbitDirection::Right),
            Self::OrbitUp => engine.camera.nudge(OrbitDirection::Up),
            Self::OrbitDown => engine.camera.nudge(OrbitDirection::Down),
            Self::BirdEye => engine.camera.bird_eye(),
            Self::ResetCamera => engine.camera.reset(),
            Self::GrowSprite => {
                let step = engine.options.sprite.size_step;
                engine.set_sprite_size(engine.sprite_size() + step);
            }
            Self::ShrinkSprite => {
                let step = engine.options.sprite.size_step;
                engine.set_sprite_size(engine.sprite_size() - step);
            }
        }
    }
}
