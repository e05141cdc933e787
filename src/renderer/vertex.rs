//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::Rgb;

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

/// 8-bit palette colour plus opacity as a vertex colour
#[inline]
pub fn rgba(rgb: Rgb, alpha: f32) -> [f32; 4] {
    [
        rgb[0] as f32 / 255.0,
        rgb[1] as f32 / 255.0,
        rgb[2] as f32 / 255.0,
        alpha.clamp(0.0, 1.0),
    ]
}

/// Opaque palette colour
#[inline]
pub fn rgb(rgb: Rgb) -> [f32; 4] {
    rgba(rgb, 1.0)
}

/// Colors shared by both games
pub mod colors {
    use crate::sim::Rgb;

    pub const BLACK: Rgb = [0, 0, 0];
    pub const WHITE: Rgb = [255, 255, 255];
    pub const GRAY: Rgb = [100, 100, 100];
    pub const LIGHT_GRAY: Rgb = [200, 200, 200];
    pub const HINT_GRAY: Rgb = [150, 150, 150];
    pub const YELLOW: Rgb = [255, 255, 0];
    pub const GREEN: Rgb = [0, 255, 0];
    pub const DARK_GREEN: Rgb = [0, 100, 0];
    pub const DARK_GRAY: Rgb = [50, 50, 50];
    pub const BLUE: Rgb = [0, 0, 255];
    pub const RED: Rgb = [255, 0, 0];
    pub const PURPLE: Rgb = [128, 0, 128];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_is_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(Vertex::desc().array_stride, 24);
    }

    #[test]
    fn test_rgba_scales_channels() {
        assert_eq!(rgba([255, 0, 51], 2.0), [1.0, 0.0, 0.2, 1.0]);
    }
}
