use serde::{Deserialize, Serialize};

/// Engine-level actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// grow_sprite = ["KeyK"]
/// bird_eye = ["KeyB"]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Orbit one step to the left.
    OrbitLeft,
    /// Orbit one step to the right.
    OrbitRight,
    /// Orbit one step upward.
    OrbitUp,
    /// Orbit one step downward.
    OrbitDown,
    /// Look straight down at the target.
    BirdEye,
    /// Increase the sprite size by one step.
    GrowSprite,
    /// Decrease the sprite size by one step.
    ShrinkSprite,
    /// Return the camera to its default viewpoint.
    ResetCamera,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_serialize_as_snake_case() {
        let json = serde_json::to_string(&KeyAction::GrowSprite).unwrap();
        assert_eq!(json, "\"grow_sprite\"");
        let back: KeyAction = serde_json::from_str("\"bird_eye\"").unwrap();
        assert_eq!(back, KeyAction::BirdEye);
    }
}
