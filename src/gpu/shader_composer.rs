use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, ComposerError, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

use crate::error::SpriteError;

/// The point-sprite raster shader: `vs_main` expands, `fs_main` fills.
pub const POINT_SPRITE_SHADER: ShaderSource = ShaderSource {
    source: include_str!("../../assets/shaders/raster/point_sprite.wgsl"),
    file_path: "raster/point_sprite.wgsl",
};

/// A WGSL source file and the path it is reported under in diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct ShaderSource {
    /// WGSL text, possibly containing `#import` directives.
    pub source: &'static str,
    /// Path used in composer error messages.
    pub file_path: &'static str,
}

/// Shared modules, registered in dependency order.
const SHARED_MODULES: &[ShaderSource] = &[ShaderSource {
    source: include_str!("../../assets/shaders/modules/sprite.wgsl"),
    file_path: "modules/sprite.wgsl",
}];

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Pre-loads the shared WGSL modules at construction time. Consuming shaders
/// use `#import pointsprite::sprite::{...}` to pull in shared code. The
/// composer produces `naga::Module` IR directly, skipping a WGSL re-parse
/// at pipeline creation.
pub struct ShaderComposer {
    composer: Composer,
}

impl ShaderComposer {
    /// Build a composer with every shared module registered.
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::Shader`] if a shared module fails to parse.
    pub fn new() -> Result<Self, SpriteError> {
        let mut composer = Composer::default();

        for m in SHARED_MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| describe(m.file_path, &e))?;
        }

        Ok(Self { composer })
    }

    /// Compose a shader into a `wgpu::ShaderModule` ready for pipeline
    /// creation.
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::Shader`] if composition fails.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        shader: ShaderSource,
    ) -> Result<wgpu::ShaderModule, SpriteError> {
        let naga_module = self.compose_naga(shader)?;

        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose a shader into a `naga::Module` without creating a wgpu
    /// shader module. Useful for validating shaders without a GPU device.
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::Shader`] if composition fails.
    pub fn compose_naga(
        &mut self,
        shader: ShaderSource,
    ) -> Result<naga::Module, SpriteError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source: shader.source,
                file_path: shader.file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| describe(shader.file_path, &e))
    }
}

fn describe(file_path: &str, e: &ComposerError) -> SpriteError {
    SpriteError::Shader(format!("'{file_path}': {e}"))
}

#[cfg(test)]
mod tests {
    use naga::valid::{Capabilities, ValidationFlags, Validator};

    use super::*;

    fn composed() -> naga::Module {
        let mut composer = ShaderComposer::new().unwrap();
        composer.compose_naga(POINT_SPRITE_SHADER).unwrap()
    }

    #[test]
    fn point_sprite_shader_composes_and_validates() {
        let module = composed();
        let _ = Validator::new(ValidationFlags::all(), Capabilities::empty())
            .validate(&module)
            .unwrap();
    }

    #[test]
    fn point_sprite_shader_exposes_both_stages() {
        let module = composed();
        let stages: Vec<(naga::ShaderStage, &str)> = module
            .entry_points
            .iter()
            .map(|ep| (ep.stage, ep.name.as_str()))
            .collect();
        assert!(stages.contains(&(naga::ShaderStage::Vertex, "vs_main")));
        assert!(stages.contains(&(naga::ShaderStage::Fragment, "fs_main")));
    }

    #[test]
    fn invalid_wgsl_is_reported() {
        let mut composer = ShaderComposer::new().unwrap();
        // Missing semicolon and an undeclared identifier.
        let err = composer
            .compose_naga(ShaderSource {
                source: "@fragment fn fs_main() -> @location(0) vec4<f32> \
                         { return undeclared_color }",
                file_path: "broken.wgsl",
            })
            .unwrap_err();
        assert!(matches!(err, SpriteError::Shader(_)), "{err}");
        assert!(err.to_string().contains("broken.wgsl"), "{err}");
    }
}
