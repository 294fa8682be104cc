//! Vertex data structures for chunk geometry.
//!
//! This module defines the interleaved vertex format produced by the mesh extractor.
//! It is `Pod` so a rendering backend can upload a chunk's buffer without conversion.

/// A vertex of chunk geometry.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes), chunk-local
/// - Normal: [f32; 3] (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
/// - Color: [f32; 3] (12 bytes), ambient occlusion shade replicated over RGB
///
/// Total size: 44 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
    /// Multiplies the sampled texture color during shading.
    pub color: [f32; 3],
}

impl Vertex {
    /// Creates a new vertex with a grey-scale shade.
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coords: [f32; 2], shade: f32) -> Self {
        Vertex {
            position,
            normal,
            tex_coords,
            color: [shade, shade, shade],
        }
    }

    /// The ambient occlusion shade of this vertex.
    pub fn shade(&self) -> f32 {
        self.color[0]
    }
}
