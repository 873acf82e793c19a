use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Configurable keyboard bindings mapping actions to key codes.
///
/// Several keys may trigger the same action, so each action maps to a list
/// of key strings (winit `KeyCode` debug names such as `"KeyK"`).
pub struct KeybindingOptions {
    /// Maps action to key strings (e.g. `GrowSprite` to `["KeyK"]`).
    pub bindings: HashMap<KeyAction, Vec<String>>,
    /// Reverse lookup cache (key string to action). Rebuilt on load.
    #[serde(skip)]
    key_to_action: HashMap<String, KeyAction>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            (KeyAction::OrbitLeft, keys(&["KeyA", "ArrowLeft"])),
            (KeyAction::OrbitRight, keys(&["KeyD", "ArrowRight"])),
            (KeyAction::OrbitUp, keys(&["KeyW", "ArrowUp"])),
            (KeyAction::OrbitDown, keys(&["KeyS", "ArrowDown"])),
            (KeyAction::BirdEye, keys(&["KeyB"])),
            (KeyAction::GrowSprite, keys(&["KeyK"])),
            (KeyAction::ShrinkSprite, keys(&["KeyJ"])),
            (KeyAction::ResetCamera, keys(&["KeyR"])),
        ]);

        let mut opts = Self {
            bindings,
            key_to_action: HashMap::new(),
        };
        opts.rebuild_reverse_map();
        opts
    }
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|&name| name.to_owned()).collect()
}

impl KeybindingOptions {
    /// Rebuild the reverse lookup map (key string to action).
    pub fn rebuild_reverse_map(&mut self) {
        self.key_to_action.clear();
        for (action, keys) in &self.bindings {
            for key in keys {
                let _ = self.key_to_action.insert(key.clone(), *action);
            }
        }
    }

    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.key_to_action.get(key).copied()
    }
}
