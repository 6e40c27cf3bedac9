//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// RGBA, each channel 0-1
pub type Color = [f32; 4];

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
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

/// Opaque color from a 0xRRGGBB literal
pub const fn rgb(hex: u32) -> Color {
    rgba(hex, 1.0)
}

/// Color from a 0xRRGGBB literal with alpha
pub const fn rgba(hex: u32, alpha: f32) -> Color {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// Colors for game elements
pub mod colors {
    use super::{Color, rgb, rgba};

    pub const SKY_TOP: Color = rgb(0x87CEEB);
    pub const SKY_HAZE: Color = rgb(0xFFE4B5);
    pub const SKY_BOTTOM: Color = rgb(0xDEB887);
    pub const CLOUD: Color = rgba(0xFFFFFF, 0.8);

    pub const PIPE_DARK: Color = rgb(0x228B22);
    pub const PIPE_LIGHT: Color = rgb(0x32CD32);
    pub const PIPE_SHADOW: Color = rgb(0x006400);

    pub const GROUND: Color = rgb(0x8B7355);
    pub const GROUND_EDGE: Color = rgb(0x6B5344);
    pub const GRASS: Color = rgb(0x228B22);
    pub const GRASS_BLADE: Color = rgb(0x32CD32);

    pub const AVATAR_BODY: Color = rgb(0xFFD700);
    pub const AVATAR_WING: Color = rgb(0xFFA500);
    pub const AVATAR_EYE: Color = rgb(0xFFFFFF);
    pub const AVATAR_PUPIL: Color = rgb(0x000000);
    pub const AVATAR_BEAK: Color = rgb(0xFF6347);

    pub const BACKGROUND: Color = SKY_TOP;
}
