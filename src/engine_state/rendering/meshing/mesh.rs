//! Chunk geometry buffers.
//!
//! A chunk's geometry is one interleaved vertex buffer plus one index buffer, ready for
//! upload by whichever rendering backend consumes it.

use crate::engine_state::rendering::Vertex;

/// The complete render geometry of one chunk.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChunkGeometry {
    /// Interleaved position/normal/uv/color vertices, in chunk-local space.
    pub vertices: Vec<Vertex>,
    /// Triangle list indices into `vertices`.
    pub indices: Vec<u32>,
}

impl ChunkGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of quads emitted. Every quad contributes four vertices.
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Appends one quad given its four corners (top-left, bottom-left, top-right,
    /// bottom-right) and the triangle list referencing them (`0..4`).
    pub fn push_quad(&mut self, corners: [Vertex; 4], triangles: [u32; 6]) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&corners);
        self.indices.extend(triangles.iter().map(|index| base + index));
    }

    /// The vertex buffer as raw bytes.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The index buffer as raw bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_offset_by_existing_vertices() {
        let vertex = Vertex::new([0.0; 3], [0.0, 1.0, 0.0], [0.0; 2], 1.0);
        let mut geometry = ChunkGeometry::new();

        geometry.push_quad([vertex; 4], [0, 1, 2, 2, 1, 3]);
        geometry.push_quad([vertex; 4], [0, 1, 2, 2, 1, 3]);

        assert_eq!(geometry.quad_count(), 2);
        assert_eq!(geometry.triangle_count(), 4);
        assert_eq!(&geometry.indices[6..], &[4, 5, 6, 6, 5, 7]);
        assert_eq!(geometry.vertex_bytes().len(), 8 * std::mem::size_of::<Vertex>());
        assert_eq!(geometry.index_bytes().len(), 12 * 4);
    }
}
