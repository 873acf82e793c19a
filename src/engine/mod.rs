//! The sprite engine: owns the GPU context, the sprite pass, the camera,
//! and the loaded points, and drives one frame at a time.

mod frame_timing;
mod input;

use glam::{Mat4, Vec2};

pub use self::frame_timing::FrameTiming;
use crate::{
    camera::OrbitController,
    error::SpriteError,
    gpu::{
        readback,
        render_context::RenderContext,
        shader_composer::ShaderComposer,
        texture::{DepthTexture, RenderTarget},
    },
    options::Options,
    points::PointCloud,
    renderer::sprite_pass::SpritePass,
    sprite::SpriteConfig,
};

/// Background clear color.
const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

/// Color format of headless engines.
const HEADLESS_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Renders a point cloud as constant-pixel-size sprites.
///
/// # Example
///
/// ```ignore
/// let mut engine = SpriteEngine::headless(800, 600, Options::default()).await?;
/// engine.set_points(&PointCloud::random_cube(10_000, 1));
/// let rgba = engine.render_offscreen()?;
/// ```
pub struct SpriteEngine {
    context: RenderContext,
    sprite_pass: SpritePass,
    depth: DepthTexture,
    offscreen: Option<RenderTarget>,
    pub(crate) camera: OrbitController,
    pub(crate) options: Options,
    sprite_size: f32,
    frame_timing: FrameTiming,
}

impl SpriteEngine {
    /// Create an engine presenting to a window surface.
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::Gpu`] if the GPU context cannot be created
    /// and [`SpriteError::Shader`] if the sprite shader fails to compose.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, SpriteError> {
        let context = RenderContext::new(window, size).await?;
        Self::with_context(context, options)
    }

    /// Create a surface-less engine rendering `width` x `height` RGBA8
    /// images.
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::Gpu`] if no adapter or device is available.
    pub async fn headless(
        width: u32,
        height: u32,
        options: Options,
    ) -> Result<Self, SpriteError> {
        let context =
            RenderContext::headless(width, height, HEADLESS_FORMAT).await?;
        Self::with_context(context, options)
    }

    /// Build an engine around an existing render context.
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::Shader`] if the sprite shader fails to
    /// compose.
    pub fn with_context(
        context: RenderContext,
        options: Options,
    ) -> Result<Self, SpriteError> {
        let mut shader_composer = ShaderComposer::new()?;
        let sprite_pass = SpritePass::new(&context, &mut shader_composer)?;
        let depth =
            DepthTexture::new(&context.device, context.width(), context.height());

        let aspect = context.width() as f32 / context.height() as f32;
        let camera = OrbitController::new(aspect, &options.camera);
        let sprite_size = options.sprite.clamp(options.sprite.size);

        log::info!(
            "sprite engine ready: {}x{} {:?}, sprite size {sprite_size}",
            context.width(),
            context.height(),
            context.format()
        );

        Ok(Self {
            context,
            sprite_pass,
            depth,
            offscreen: None,
            camera,
            options,
            sprite_size,
            frame_timing: FrameTiming::new(),
        })
    }

    /// Replace the drawn points.
    pub fn set_points(&mut self, cloud: &PointCloud) {
        let instances = cloud.to_instances();
        let reallocated = self.sprite_pass.write_instances(
            &self.context.device,
            &self.context.queue,
            &instances,
        );
        if reallocated {
            log::debug!("sprite instance buffer grown for {} points", cloud.len());
        }
    }

    /// Number of points the next frame draws.
    #[must_use]
    pub fn point_count(&self) -> u32 {
        self.sprite_pass.instance_count()
    }

    /// Current sprite edge length in pixels.
    #[must_use]
    pub fn sprite_size(&self) -> f32 {
        self.sprite_size
    }

    /// Set the sprite edge length, clamped to the configured range.
    pub fn set_sprite_size(&mut self, size: f32) {
        self.sprite_size = self.options.sprite.clamp(size);
        log::debug!("sprite size {:.2}", self.sprite_size);
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace the options. Camera projection and speeds are re-read, the
    /// sprite size is reset to the new default.
    pub fn set_options(&mut self, options: Options) {
        self.camera.apply_options(&options.camera);
        self.sprite_size = options.sprite.clamp(options.sprite.size);
        self.options = options;
    }

    /// The orbit camera.
    #[must_use]
    pub fn camera(&self) -> &OrbitController {
        &self.camera
    }

    /// Current view-projection matrix.
    #[must_use]
    pub fn view_proj(&self) -> Mat4 {
        self.camera.view_proj()
    }

    /// Render target size in pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.context.width(), self.context.height())
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }

    /// Resize the color target, depth buffer, and camera projection.
    /// Zero-sized dimensions (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.depth = DepthTexture::new(&self.context.device, width, height);
        self.offscreen = None;
        self.camera.set_aspect(width as f32 / height as f32);
    }

    /// The per-draw configuration for the current camera, size, and sprite
    /// size.
    #[must_use]
    pub fn sprite_config(&self) -> SpriteConfig {
        SpriteConfig::new(
            self.camera.view_proj(),
            Vec2::new(self.context.width() as f32, self.context.height() as f32),
            self.sprite_size,
        )
    }

    /// Upload the current [`SpriteConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::Uniform`] if the block cannot be encoded.
    pub fn update(&mut self) -> Result<(), SpriteError> {
        let config = self.sprite_config();
        self.sprite_pass.update_uniform(&self.context.queue, &config)
    }

    /// Render one frame to the window surface and present it.
    ///
    /// A frame whose config cannot be uploaded is skipped and logged, so
    /// no frame is ever drawn with a stale config.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain frame cannot be
    /// acquired.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if let Err(e) = self.update() {
            log::error!("sprite uniform upload failed, frame skipped: {e}");
            return Ok(());
        }

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.encode_and_submit(&view);
        frame.present();

        self.frame_timing.end_frame();
        Ok(())
    }

    /// Render one frame into a caller-owned view of the context's color
    /// format and size. No present happens.
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::Uniform`] if the config cannot be uploaded.
    pub fn render_to_view(
        &mut self,
        view: &wgpu::TextureView,
    ) -> Result<(), SpriteError> {
        self.update()?;
        self.encode_and_submit(view);
        self.frame_timing.end_frame();
        Ok(())
    }

    /// Render one frame offscreen and read it back as tightly packed RGBA8
    /// rows, top row first.
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::Readback`] if the pixels cannot be copied
    /// back, or [`SpriteError::Uniform`] if the config cannot be uploaded.
    pub fn render_offscreen(&mut self) -> Result<Vec<u8>, SpriteError> {
        let (width, height) = self.size();
        let target = match self.offscreen.take() {
            Some(target) if target.width() == width && target.height() == height => {
                target
            }
            _ => RenderTarget::new(
                &self.context.device,
                width,
                height,
                self.context.format(),
            ),
        };

        let result = self
            .render_to_view(&target.view)
            .and_then(|()| readback::read_rgba8(&self.context, &target));
        self.offscreen = Some(target);
        result
    }

    fn encode_and_submit(&self, view: &wgpu::TextureView) {
        let mut encoder = self.context.create_encoder();
        {
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("sprite render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(
                    wgpu::RenderPassDepthStencilAttachment {
                        view: &self.depth.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    },
                ),
                ..Default::default()
            });
            self.sprite_pass.draw(&mut rp);
        }
        self.context.submit(encoder);
    }
}
