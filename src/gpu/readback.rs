//! Blocking color-target readback for offscreen rendering and GPU tests.

use std::sync::mpsc;

use super::{render_context::RenderContext, texture::RenderTarget};
use crate::error::SpriteError;

const BYTES_PER_PIXEL: u32 = 4;

/// Row pitch of a texture-to-buffer copy, rounded up to wgpu's
/// `COPY_BYTES_PER_ROW_ALIGNMENT`.
#[must_use]
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * BYTES_PER_PIXEL;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Copy `target` back to the CPU as tightly packed RGBA8 rows, top row
/// first. BGRA targets are swizzled to RGBA.
///
/// Blocks until the GPU has finished all submitted work.
///
/// # Errors
///
/// Returns [`SpriteError::Readback`] for formats other than 8-bit
/// RGBA/BGRA, or if mapping the staging buffer fails.
pub fn read_rgba8(
    context: &RenderContext,
    target: &RenderTarget,
) -> Result<Vec<u8>, SpriteError> {
    let swizzle = match target.texture.format() {
        wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb => {
            false
        }
        wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb => {
            true
        }
        other => {
            return Err(SpriteError::Readback(format!(
                "unsupported readback format {other:?}"
            )))
        }
    };

    let (width, height) = (target.width(), target.height());
    let padded_row = padded_bytes_per_row(width);
    let staging = context.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Sprite Readback Buffer"),
        size: u64::from(padded_row) * u64::from(height),
        usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let mut encoder = context.create_encoder();
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture: &target.texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &staging,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded_row),
                rows_per_image: Some(height),
            },
        },
        target.texture.size(),
    );
    context.submit(encoder);

    let slice = staging.slice(..);
    let (tx, rx) = mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    let _ = context
        .device
        .poll(wgpu::PollType::Wait)
        .map_err(|e| SpriteError::Readback(e.to_string()))?;
    rx.recv()
        .map_err(|e| SpriteError::Readback(e.to_string()))?
        .map_err(|e| SpriteError::Readback(e.to_string()))?;

    let pixels = {
        let mapped = slice.get_mapped_range();
        unpad_rows(&mapped, width, height, swizzle)
    };
    staging.unmap();
    Ok(pixels)
}

/// Strip row padding and optionally swap the red and blue channels.
fn unpad_rows(data: &[u8], width: u32, height: u32, swizzle: bool) -> Vec<u8> {
    let row_bytes = (width * BYTES_PER_PIXEL) as usize;
    let padded_row = padded_bytes_per_row(width) as usize;
    let mut out = Vec::with_capacity(row_bytes * height as usize);
    for row in data.chunks(padded_row).take(height as usize) {
        out.extend_from_slice(&row[..row_bytes]);
    }
    if swizzle {
        for px in out.chunks_exact_mut(BYTES_PER_PIXEL as usize) {
            px.swap(0, 2);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_padded_to_copy_alignment() {
        assert_eq!(padded_bytes_per_row(64), 256);
        assert_eq!(padded_bytes_per_row(65), 512);
        assert_eq!(padded_bytes_per_row(800), 3328);
        assert_eq!(padded_bytes_per_row(1), 256);
    }

    #[test]
    fn padding_is_stripped_per_row() {
        let (width, height) = (2, 3);
        let padded_row = padded_bytes_per_row(width) as usize;
        let mut data = vec![0xEE; padded_row * height as usize];
        for y in 0..height as usize {
            for x in 0..8 {
                data[y * padded_row + x] = (y * 8 + x) as u8;
            }
        }
        let out = unpad_rows(&data, width, height, false);
        assert_eq!(out.len(), 24);
        assert_eq!(out, (0..24).collect::<Vec<u8>>());
    }

    #[test]
    fn bgra_is_swizzled_to_rgba() {
        let padded_row = padded_bytes_per_row(1) as usize;
        let mut data = vec![0; padded_row];
        data[..4].copy_from_slice(&[10, 20, 30, 40]);
        assert_eq!(unpad_rows(&data, 1, 1, true), vec![30, 20, 10, 40]);
    }
}
