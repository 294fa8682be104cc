//! Render data for the voxel engine.
//!
//! This module turns voxel data into backend-agnostic geometry: interleaved vertices,
//! triangle indices, and atlas UVs. Uploading and drawing the buffers is left to the
//! embedding renderer.

pub mod atlas;
pub mod meshing;
mod vertex;

// Re-export commonly used types
pub use atlas::AtlasLayout;
pub use meshing::{ChunkGeometry, MeshExtractor};
pub use vertex::Vertex;
