//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Palette, in raylib's 8-bit named colors
pub mod colors {
    /// 8-bit RGBA to the linear floats the vertex buffer carries
    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> [f32; 4] {
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ]
    }

    pub const BACKGROUND: [f32; 4] = rgba8(80, 80, 80, 255); // DarkGray
    pub const PADDLE: [f32; 4] = rgba8(0, 121, 241, 255); // Blue
    pub const BALL: [f32; 4] = rgba8(255, 255, 255, 255); // White
    pub const BLOCK_RED: [f32; 4] = rgba8(230, 41, 55, 255); // Red
    pub const BLOCK_ORANGE: [f32; 4] = rgba8(255, 161, 0, 255); // Orange
    pub const BLOCK_GREEN: [f32; 4] = rgba8(0, 228, 48, 255); // Green
    pub const BLOCK_YELLOW: [f32; 4] = rgba8(253, 249, 0, 255); // Yellow
    /// Dims the playfield behind the game-over banner
    pub const GAME_OVER_SHADE: [f32; 4] = rgba8(0, 0, 0, 115);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba8_scales_to_unit_range() {
        assert_eq!(colors::rgba8(255, 0, 255, 0), [1.0, 0.0, 1.0, 0.0]);
        assert_eq!(colors::BALL, [1.0; 4]);
    }

    #[test]
    fn test_layout_matches_struct() {
        let desc = Vertex::desc();
        assert_eq!(desc.array_stride as usize, std::mem::size_of::<Vertex>());
        assert_eq!(desc.attributes[1].offset, 8);
    }
}
