//! Input handling: platform-agnostic events and bindable key actions.

/// Platform-agnostic input events.
pub mod event;
/// Actions that keyboard shortcuts can trigger.
pub mod keyboard;

pub use event::{InputEvent, MouseButton};
pub use keyboard::KeyAction;
