//! Viewer options with TOML preset support.
//!
//! Sprite sizing, camera parameters, and keybindings are consolidated here.
//! Options serialize to/from TOML so a viewing setup can be saved and
//! passed back with `--options`.

mod camera;
mod keybindings;
mod sprite;

use std::path::Path;

pub use camera::CameraOptions;
pub use keybindings::KeybindingOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use sprite::SpriteOptions;

use crate::error::SpriteError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[sprite]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Sprite sizing.
    pub sprite: SpriteOptions,
    /// Camera projection and control parameters.
    pub camera: CameraOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the user-facing options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::Io`] if the file cannot be read and
    /// [`SpriteError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, SpriteError> {
        let content = std::fs::read_to_string(path).map_err(SpriteError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::OptionsParse`] on malformed input.
    pub fn from_toml(content: &str) -> Result<Self, SpriteError> {
        let mut options: Self = toml::from_str(content)
            .map_err(|e| SpriteError::OptionsParse(e.to_string()))?;
        options.keybindings.rebuild_reverse_map();
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::OptionsParse`] if serialization fails and
    /// [`SpriteError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), SpriteError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SpriteError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SpriteError::Io)?;
        }
        std::fs::write(path, content).map_err(SpriteError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[sprite]
size = 20.0
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.sprite.size, 20.0);
        assert_eq!(opts.sprite.size_step, 0.1);
        assert_eq!(opts.camera.fovy, 45.0);
        assert_eq!(opts.keybindings.lookup("KeyK"), Some(KeyAction::GrowSprite));
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[sprite]\nsize = \"big\"").unwrap_err();
        assert!(matches!(err, SpriteError::OptionsParse(_)));
    }

    #[test]
    fn custom_bindings_rebuild_lookup() {
        let toml_str = r#"
[keybindings.bindings]
grow_sprite = ["Equal"]
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.keybindings.lookup("Equal"), Some(KeyAction::GrowSprite));
        assert_eq!(opts.keybindings.lookup("KeyK"), None);
    }

    #[test]
    fn bindings_are_lists_of_key_codes() {
        let toml_str = r#"
[keybindings.bindings]
grow_sprite = ["KeyK"]
bird_eye = ["KeyB"]
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.keybindings.lookup("KeyK"), Some(KeyAction::GrowSprite));
        assert_eq!(opts.keybindings.lookup("KeyB"), Some(KeyAction::BirdEye));

        let bare = "[keybindings.bindings]\ngrow_sprite = \"KeyK\"\n";
        assert!(matches!(
            Options::from_toml(bare),
            Err(SpriteError::OptionsParse(_))
        ));
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(opts.keybindings.lookup("KeyJ"), Some(KeyAction::ShrinkSprite));
        assert_eq!(opts.keybindings.lookup("KeyB"), Some(KeyAction::BirdEye));
        assert_eq!(opts.keybindings.lookup("ArrowLeft"), Some(KeyAction::OrbitLeft));
        assert_eq!(opts.keybindings.lookup("KeyA"), Some(KeyAction::OrbitLeft));
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn sprite_size_clamps() {
        let sprite = SpriteOptions::default();
        assert_eq!(sprite.clamp(-3.0), 0.0);
        assert_eq!(sprite.clamp(500.0), 64.0);
        assert_eq!(sprite.clamp(7.5), 7.5);
    }

    #[test]
    fn save_then_load_preserves_options() {
        let dir = std::env::temp_dir().join(format!(
            "pointsprite-options-{}",
            std::process::id()
        ));
        let path = dir.join("preset.toml");
        let mut opts = Options::default();
        opts.sprite.size = 12.0;
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("sprite"));
        assert!(props.contains_key("camera"));
        assert!(!props.contains_key("keybindings"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("fovy").is_some());
        assert!(camera.get("znear").is_none());
        let sprite = &props["sprite"]["properties"];
        assert!(sprite.get("size").is_some());
        assert!(sprite.get("max_size").is_none());
    }
}
