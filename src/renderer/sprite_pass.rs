//! The point-sprite draw pass.
//!
//! One pipeline, one uniform buffer holding the [`SpriteConfig`], and one
//! per-instance vertex buffer of [`PointInstance`]s. Each frame issues a
//! single `draw(0..6, 0..instance_count)`: six corner invocations per point,
//! triangle-list topology.

use encase::ShaderType;

use super::pipeline_util;
use crate::{
    error::SpriteError,
    gpu::{
        dynamic_buffer::TypedBuffer,
        render_context::RenderContext,
        shader_composer::{ShaderComposer, POINT_SPRITE_SHADER},
    },
    sprite::{PointInstance, SpriteConfig, SpriteUniform, VERTICES_PER_SPRITE},
};

/// Initial instance-buffer capacity, in points.
const INITIAL_CAPACITY: usize = 1024;

/// Pipeline, uniform, and instance buffer for drawing point sprites.
pub struct SpritePass {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    instance_buffer: TypedBuffer<PointInstance>,
    instance_count: u32,
}

impl SpritePass {
    /// Build the pipeline for the context's color format.
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::Shader`] if the sprite shader fails to
    /// compose.
    pub fn new(
        context: &RenderContext,
        shader_composer: &mut ShaderComposer,
    ) -> Result<Self, SpriteError> {
        let device = &context.device;

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Sprite Uniform Buffer"),
            size: SpriteUniform::min_size().get(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = Self::create_bind_group_layout(device);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Sprite Uniform Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let instance_buffer = TypedBuffer::with_capacity(
            device,
            "Sprite Instance Buffer",
            INITIAL_CAPACITY,
            wgpu::BufferUsages::VERTEX,
        );

        let pipeline = Self::create_pipeline(
            context,
            &bind_group_layout,
            shader_composer,
        )?;

        Ok(Self {
            pipeline,
            uniform_buffer,
            bind_group,
            instance_buffer,
            instance_count: 0,
        })
    }

    fn create_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Sprite Uniform Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(SpriteUniform::min_size()),
                },
                count: None,
            }],
        })
    }

    fn create_pipeline(
        context: &RenderContext,
        bind_group_layout: &wgpu::BindGroupLayout,
        shader_composer: &mut ShaderComposer,
    ) -> Result<wgpu::RenderPipeline, SpriteError> {
        let shader = shader_composer.compose(
            &context.device,
            "Point Sprite Shader",
            POINT_SPRITE_SHADER,
        )?;

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Point Sprite Pipeline Layout"),
                bind_group_layouts: &[bind_group_layout],
                push_constant_ranges: &[],
            },
        );

        Ok(context
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Point Sprite Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[PointInstance::layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &pipeline_util::color_targets(context.format()),
                    compilation_options: Default::default(),
                }),
                primitive: pipeline_util::primitive_state(),
                depth_stencil: Some(pipeline_util::depth_stencil_state()),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            }))
    }

    /// Upload the instance buffer, growing it if needed.
    ///
    /// Returns `true` if the underlying buffer was reallocated.
    pub fn write_instances(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        instances: &[PointInstance],
    ) -> bool {
        let reallocated = self.instance_buffer.write(device, queue, instances);
        self.instance_count = instances.len() as u32;
        log::debug!(
            "uploaded {} sprite instances (capacity {})",
            self.instance_count,
            self.instance_buffer.capacity()
        );
        reallocated
    }

    /// Upload the per-draw configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::Uniform`] if the block cannot be encoded.
    pub fn update_uniform(
        &self,
        queue: &wgpu::Queue,
        config: &SpriteConfig,
    ) -> Result<(), SpriteError> {
        config.debug_validate();
        let bytes = config.to_uniform_bytes()?;
        queue.write_buffer(&self.uniform_buffer, 0, &bytes);
        Ok(())
    }

    /// Record the draw. Does nothing when no instances are loaded.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.instance_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.instance_buffer.buffer().slice(..));
        render_pass.draw(0..VERTICES_PER_SPRITE, 0..self.instance_count);
    }

    /// Number of sprites the next draw will emit.
    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }
}
