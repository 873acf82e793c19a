use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Sprite", inline)]
#[serde(default)]
/// On-screen sprite sizing.
pub struct SpriteOptions {
    /// Sprite edge length in pixels.
    #[schemars(title = "Size", range(min = 0.0, max = 64.0), extend("step" = 0.1))]
    pub size: f32,
    /// Amount a single grow/shrink keypress changes the size by.
    #[schemars(title = "Size Step", range(min = 0.1, max = 8.0), extend("step" = 0.1))]
    pub size_step: f32,
    /// Lower clamp for interactive size changes.
    #[schemars(skip)]
    pub min_size: f32,
    /// Upper clamp for interactive size changes.
    #[schemars(skip)]
    pub max_size: f32,
}

impl Default for SpriteOptions {
    fn default() -> Self {
        Self {
            size: 1.5,
            size_step: 0.1,
            min_size: 0.0,
            max_size: 64.0,
        }
    }
}

impl SpriteOptions {
    /// Clamp `size` into `[min_size, max_size]`.
    #[must_use]
    pub fn clamp(&self, size: f32) -> f32 {
        size.clamp(self.min_size, self.max_size.max(self.min_size))
    }
}
