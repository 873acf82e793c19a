use glam::Vec3;

/// One sprite's world-space position, as laid out in the instance buffer.
/// Must match the `@location(0)` vertex input of the sprite shader.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointInstance {
    /// World-space `x, y, z`.
    pub position: [f32; 3],
}

impl PointInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] =
        wgpu::vertex_attr_array![0 => Float32x3];

    /// Per-instance vertex buffer layout: one tightly packed `Float32x3`.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

impl From<Vec3> for PointInstance {
    fn from(position: Vec3) -> Self {
        Self {
            position: position.to_array(),
        }
    }
}

impl From<PointInstance> for Vec3 {
    fn from(instance: PointInstance) -> Self {
        Self::from_array(instance.position)
    }
}
