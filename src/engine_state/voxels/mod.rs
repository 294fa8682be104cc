//! # Voxel Engine Core
//!
//! This module contains the voxel data model and the world that streams it.
//!
//! ## Architecture
//!
//! The voxel system is organized into several key components:
//!
//! * **Block**: The static registry of block types and their properties
//! * **Chunk**: Fixed-size 3D arrays of block ids plus their derived geometry
//! * **Generation**: Deterministic generators that fill newly loaded chunks
//! * **World**: Coordinates chunks and provides a unified interface for the entire voxel space
//!
//! ## Data Flow
//!
//! 1. The driver hands the world a reference position every tick
//! 2. The world queues, generates and unloads chunks around it under fixed budgets
//! 3. Loads and edits mark chunks dirty; dirty chunks are remeshed a few at a time
//! 4. Physics and targeting read voxels through [`VoxelAccess`]

pub mod block;
pub mod chunk;
pub mod generation;
mod voxel_access;
pub mod world;

pub use voxel_access::VoxelAccess;
